/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion pipeline
//!
//! Orchestrates the fixed stage order decode, tone map, normalize,
//! resize, encode. Each stage is a free function in its own module;
//! this module owns sequencing, parameter validation and the error
//! taxonomy mapping, nothing else.
//!
//! Most callers want [`convert`]. The [`Conversion`] driver underneath
//! it is public for callers that want to step stages individually.

use std::path::PathBuf;
use std::time::Instant;

use glance_core::buffer::PixelBuffer;
use glance_core::options::DecoderOptions;
use log::trace;

use crate::decoder::{decode_bytes, decode_file};
use crate::encoder::encode_data_uri;
use crate::errors::{ConvertErrors, EncodeErrors};
use crate::normalize::to_display;
use crate::resize::resize_to_fit;
use crate::tonemap::tone_map;

/// Bounding dimension applied when a request does not carry one
pub const DEFAULT_MAX_SIZE: usize = 800;

/// Gamma applied when a request does not carry one
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Where the conversion reads its EXR bytes from
#[derive(Debug)]
pub enum ConvertSource {
    /// A file on disk, existence is checked before decoding starts
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>)
}

/// A single conversion request
///
/// Built with [`from_path`](ConvertRequest::from_path) or
/// [`from_bytes`](ConvertRequest::from_bytes) and customized through
/// the consuming setters.
#[derive(Debug)]
pub struct ConvertRequest {
    source:          ConvertSource,
    max_size:        Option<usize>,
    gamma:           f32,
    decoder_options: DecoderOptions
}

impl ConvertRequest {
    /// Create a request reading from a file path
    ///
    /// Defaults: [`DEFAULT_MAX_SIZE`] bounding box, [`DEFAULT_GAMMA`]
    /// tone curve.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> ConvertRequest {
        ConvertRequest {
            source:          ConvertSource::Path(path.into()),
            max_size:        Some(DEFAULT_MAX_SIZE),
            gamma:           DEFAULT_GAMMA,
            decoder_options: DecoderOptions::default()
        }
    }

    /// Create a request reading from an in-memory EXR stream
    pub fn from_bytes(data: Vec<u8>) -> ConvertRequest {
        ConvertRequest {
            source:          ConvertSource::Bytes(data),
            max_size:        Some(DEFAULT_MAX_SIZE),
            gamma:           DEFAULT_GAMMA,
            decoder_options: DecoderOptions::default()
        }
    }

    /// Set the bounding dimension, `None` disables resizing entirely
    #[must_use]
    pub fn set_max_size(mut self, max_size: Option<usize>) -> ConvertRequest {
        self.max_size = max_size;
        self
    }

    /// Set the tone mapping gamma
    #[must_use]
    pub fn set_gamma(mut self, gamma: f32) -> ConvertRequest {
        self.gamma = gamma;
        self
    }

    /// Override the decoder safety limits
    #[must_use]
    pub fn set_decoder_options(mut self, options: DecoderOptions) -> ConvertRequest {
        self.decoder_options = options;
        self
    }

    pub const fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub const fn gamma(&self) -> f32 {
        self.gamma
    }
}

#[derive(Copy, Clone, Debug)]
enum ConvertState {
    /// Request accepted, nothing ran yet
    Received,
    /// Produce the linear f32 buffer from the source
    Decoding,
    /// Compress dynamic range into [0, 1]
    ToneMapping,
    /// Flatten alpha and quantize to 8 bits
    Normalizing,
    /// Fit within the bounding box
    Resizing,
    /// Compress and wrap as a data URI
    Encoding,
    /// The pipeline is done.
    Done
}

impl ConvertState {
    pub fn next(self) -> Option<Self> {
        match self {
            ConvertState::Received => Some(ConvertState::Decoding),
            ConvertState::Decoding => Some(ConvertState::ToneMapping),
            ConvertState::ToneMapping => Some(ConvertState::Normalizing),
            ConvertState::Normalizing => Some(ConvertState::Resizing),
            ConvertState::Resizing => Some(ConvertState::Encoding),
            ConvertState::Encoding => Some(ConvertState::Done),
            ConvertState::Done => None
        }
    }
}

/// A conversion in flight
///
/// Owns the intermediate buffers and walks the stage order one
/// [`advance`](Conversion::advance) call at a time. Constructing the
/// driver validates the request, an invalid request never reaches a
/// stage.
pub struct Conversion {
    state:   Option<ConvertState>,
    request: ConvertRequest,
    hdr:     Option<PixelBuffer<f32>>,
    display: Option<PixelBuffer<u8>>,
    output:  Option<String>
}

impl Conversion {
    /// Validate a request and prepare it for execution
    ///
    /// # Returns
    /// - `Ok(conversion)`: The parameters are in range and, for path
    ///   sources, the file exists
    /// - `Err(e)`: `InvalidParameter` or `NotFound`, reported before any
    ///   pixel work happens
    pub fn new(request: ConvertRequest) -> Result<Conversion, ConvertErrors> {
        if !request.gamma.is_finite() || request.gamma <= 0.0 {
            return Err(ConvertErrors::InvalidParameter(
                "gamma",
                format!("must be a positive finite number, got {}", request.gamma)
            ));
        }
        if request.max_size == Some(0) {
            return Err(ConvertErrors::InvalidParameter(
                "max_size",
                String::from("must be at least 1")
            ));
        }
        if let ConvertSource::Path(path) = &request.source {
            let is_file = std::fs::metadata(path)
                .map(|m| m.is_file())
                .unwrap_or(false);

            if !is_file {
                return Err(ConvertErrors::NotFound(path.clone()));
            }
        }

        Ok(Conversion {
            state: Some(ConvertState::Received),
            request,
            hdr: None,
            display: None,
            output: None
        })
    }

    /// Run the current stage and move to the next one
    ///
    /// A stage failure clears the state, further calls are no-ops.
    pub fn advance(&mut self) -> Result<(), ConvertErrors> {
        let Some(state) = self.state else {
            return Ok(());
        };

        let start = Instant::now();

        let result = self.run_stage(state);

        if result.is_err() {
            self.state = None;
            return result;
        }

        trace!(
            "Finished {:?} in {} ms",
            state,
            start.elapsed().as_millis()
        );

        self.state = state.next();

        Ok(())
    }

    fn run_stage(&mut self, state: ConvertState) -> Result<(), ConvertErrors> {
        match state {
            ConvertState::Received | ConvertState::Done => {}
            ConvertState::Decoding => {
                let options = self.request.decoder_options;

                let hdr = match &self.request.source {
                    ConvertSource::Path(path) => decode_file(path, options)?,
                    ConvertSource::Bytes(data) => decode_bytes(data, options)?
                };

                let (width, height) = hdr.dimensions();
                trace!(
                    "Decoded {width}x{height} image as {:?}",
                    hdr.colorspace()
                );

                self.hdr = Some(hdr);
            }
            ConvertState::ToneMapping => {
                let hdr = self
                    .hdr
                    .as_mut()
                    .ok_or(ConvertErrors::Decode(crate::errors::DecodeErrors::Generic(
                        "no decoded image to tone map"
                    )))?;

                tone_map(hdr, self.request.gamma);
            }
            ConvertState::Normalizing => {
                let hdr = self
                    .hdr
                    .take()
                    .ok_or(ConvertErrors::Decode(crate::errors::DecodeErrors::Generic(
                        "no decoded image to normalize"
                    )))?;

                self.display = Some(to_display(hdr));
            }
            ConvertState::Resizing => {
                if let Some(max_size) = self.request.max_size {
                    let display = self.display.take().ok_or(ConvertErrors::Encode(
                        EncodeErrors::Static("no image to resize")
                    ))?;

                    self.display = Some(resize_to_fit(display, max_size));
                }
            }
            ConvertState::Encoding => {
                let display = self.display.as_ref().ok_or(ConvertErrors::Encode(
                    EncodeErrors::Static("no image to encode")
                ))?;

                self.output = Some(encode_data_uri(display)?);
            }
        }

        Ok(())
    }

    /// Run every remaining stage
    pub fn advance_to_end(&mut self) -> Result<(), ConvertErrors> {
        while self.state.is_some() {
            self.advance()?;
        }
        Ok(())
    }

    /// Take the finished data URI out of the driver
    ///
    /// Returns `None` until the encode stage has run.
    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }
}

/// Run a request through the whole pipeline
///
/// # Returns
/// - `Ok(uri)`: A `data:image/jpeg;base64,` URI holding the thumbnail
/// - `Err(e)`: One of the five [`ConvertErrorKind`](crate::errors::ConvertErrorKind)s
pub fn convert(request: ConvertRequest) -> Result<String, ConvertErrors> {
    let start = Instant::now();

    let mut conversion = Conversion::new(request)?;

    conversion.advance_to_end()?;

    let output = conversion.take_output().ok_or(ConvertErrors::Encode(
        EncodeErrors::Static("pipeline finished without producing output")
    ))?;

    trace!(
        "Finished conversion in {} ms",
        start.elapsed().as_millis()
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{convert, Conversion, ConvertRequest};
    use crate::errors::{ConvertErrorKind, ConvertErrors};

    #[test]
    fn non_positive_gamma_is_rejected_before_decoding() {
        // the bytes are garbage, rejection must happen before they are touched
        let request = ConvertRequest::from_bytes(vec![0_u8; 16]).set_gamma(0.0);

        let err = convert(request).unwrap_err();
        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);

        let request = ConvertRequest::from_bytes(vec![0_u8; 16]).set_gamma(f32::NAN);

        let err = convert(request).unwrap_err();
        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);
    }

    #[test]
    fn zero_max_size_is_rejected() {
        let request = ConvertRequest::from_bytes(vec![0_u8; 16]).set_max_size(Some(0));

        let err = convert(request).unwrap_err();
        assert_eq!(err.kind(), ConvertErrorKind::InvalidParameter);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let request = ConvertRequest::from_path("/definitely/not/here.exr");

        let err = convert(request).unwrap_err();

        assert!(matches!(err, ConvertErrors::NotFound(_)));
        assert_eq!(err.kind(), ConvertErrorKind::NotFound);
    }

    #[test]
    fn garbage_bytes_report_a_decode_error() {
        let request = ConvertRequest::from_bytes(b"not an exr".to_vec());

        let err = convert(request).unwrap_err();
        assert_eq!(err.kind(), ConvertErrorKind::Decode);
    }

    #[test]
    fn failed_driver_stops_advancing() {
        let request = ConvertRequest::from_bytes(b"not an exr".to_vec());
        let mut conversion = Conversion::new(request).unwrap();

        assert!(conversion.advance().is_ok()); // Received
        assert!(conversion.advance().is_err()); // Decoding fails

        // state is cleared, further advances are inert
        assert!(conversion.advance().is_ok());
        assert!(conversion.take_output().is_none());
    }
}
