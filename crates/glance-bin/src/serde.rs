/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Wire types for the JSON interface
//!
//! The request shape is `{"file_path", "max_size", "gamma"}` with the
//! last two optional. Responses are `{"success": true, "data": ..}` or
//! `{"success": false, "status": .., "error": ..}`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use glance_convert::{ConvertErrors, ConvertRequest, StatusClass};

/// Outcome of one request as it goes onto the wire
pub enum ConvertResponse {
    Success { data: String },
    Failure { status: u16, error: String }
}

impl ConvertResponse {
    pub fn from_result(result: Result<String, ConvertErrors>) -> ConvertResponse {
        match result {
            Ok(data) => ConvertResponse::Success { data },
            Err(err) => ConvertResponse::Failure {
                status: status_code(&err),
                error:  format!("{:?}", err).trim_end().to_string()
            }
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, ConvertResponse::Success { .. })
    }
}

impl Serialize for ConvertResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self {
            ConvertResponse::Success { data } => {
                let mut state = serializer.serialize_struct("ConvertResponse", 2)?;

                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;

                state.end()
            }
            ConvertResponse::Failure { status, error } => {
                let mut state = serializer.serialize_struct("ConvertResponse", 3)?;

                state.serialize_field("success", &false)?;
                state.serialize_field("status", status)?;
                state.serialize_field("error", error)?;

                state.end()
            }
        }
    }
}

/// HTTP-style status code for an error, the taxonomy maps onto the
/// classic 400/404/500 split
pub fn status_code(err: &ConvertErrors) -> u16 {
    match err.kind().status_class() {
        StatusClass::ClientError => 400,
        StatusClass::NotFound => 404,
        StatusClass::ServerError => 500
    }
}

/// Liveness report printed by the probe mode
pub struct HealthProbe {
    backend: &'static str,
    version: &'static str
}

impl HealthProbe {
    pub fn current() -> HealthProbe {
        HealthProbe {
            backend: glance_convert::DECODE_BACKEND,
            version: glance_convert::crate_version()
        }
    }
}

impl Serialize for HealthProbe {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("HealthProbe", 3)?;

        state.serialize_field("status", "ok")?;
        state.serialize_field("backend", self.backend)?;
        state.serialize_field("version", self.version)?;

        state.end()
    }
}

/// Parse one JSON request body into a [`ConvertRequest`]
///
/// # Returns
/// - `Ok(request)`: The body carried a `file_path` and any optional
///   fields were well typed
/// - `Err(e)`: `InvalidParameter`, a missing or malformed field
pub fn request_from_json(body: &str) -> Result<ConvertRequest, ConvertErrors> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ConvertErrors::InvalidParameter("body", format!("request is not valid JSON: {e}"))
    })?;

    let Some(path) = value.get("file_path") else {
        return Err(ConvertErrors::InvalidParameter(
            "file_path",
            String::from("field is required")
        ));
    };
    let Some(path) = path.as_str() else {
        return Err(ConvertErrors::InvalidParameter(
            "file_path",
            String::from("field must be a string")
        ));
    };

    let mut request = ConvertRequest::from_path(path);

    if let Some(max_size) = value.get("max_size") {
        let Some(max_size) = max_size.as_u64() else {
            return Err(ConvertErrors::InvalidParameter(
                "max_size",
                format!("must be a positive integer, got {max_size}")
            ));
        };
        request = request.set_max_size(Some(max_size as usize));
    }
    if let Some(gamma) = value.get("gamma") {
        let Some(gamma) = gamma.as_f64() else {
            return Err(ConvertErrors::InvalidParameter(
                "gamma",
                format!("must be a number, got {gamma}")
            ));
        };
        request = request.set_gamma(gamma as f32);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use glance_convert::{ConvertErrorKind, DEFAULT_MAX_SIZE};

    use super::{request_from_json, ConvertResponse};

    #[test]
    fn missing_file_path_is_an_invalid_parameter() {
        let err = request_from_json(r#"{"max_size": 400}"#).unwrap_err();

        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);
    }

    #[test]
    fn malformed_json_is_an_invalid_parameter() {
        let err = request_from_json("{not json").unwrap_err();

        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);
    }

    #[test]
    fn negative_max_size_is_rejected() {
        let body = r#"{"file_path": "a.exr", "max_size": -5}"#;
        let err = request_from_json(body).unwrap_err();

        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let request = request_from_json(r#"{"file_path": "a.exr"}"#).unwrap();

        assert_eq!(request.max_size(), Some(DEFAULT_MAX_SIZE));
        assert_eq!(request.gamma(), glance_convert::DEFAULT_GAMMA);
    }

    #[test]
    fn responses_serialize_with_the_contract_fields() {
        let ok = ConvertResponse::Success {
            data: String::from("data:image/jpeg;base64,AAAA")
        };
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"data":"data:image/jpeg;base64,AAAA"}"#
        );

        let fail = ConvertResponse::Failure {
            status: 404,
            error:  String::from("File not found: a.exr")
        };
        let json = serde_json::to_string(&fail).unwrap();
        assert_eq!(
            json,
            r#"{"success":false,"status":404,"error":"File not found: a.exr"}"#
        );
    }
}
