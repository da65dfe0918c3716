/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! EXR to JPEG thumbnail conversion
//!
//! Takes an OpenEXR image, compresses its dynamic range into something
//! a browser can show, fits it inside a bounding box and hands back a
//! base64 JPEG data URI.
//!
//! The stage order is fixed: decode, tone map, normalize, resize,
//! encode. [`convert`] runs all of it.
//!
//! ```no_run
//! use glance_convert::{convert, ConvertRequest};
//!
//! let request = ConvertRequest::from_path("render.exr")
//!     .set_max_size(Some(400))
//!     .set_gamma(2.2);
//!
//! let data_uri = convert(request).unwrap();
//! assert!(data_uri.starts_with("data:image/jpeg;base64,"));
//! ```
#![forbid(unsafe_code)]
#![warn(clippy::correctness, clippy::perf, clippy::panic)]

pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod normalize;
pub mod pipeline;
pub mod resize;
pub mod tonemap;

pub use errors::{ConvertErrorKind, ConvertErrors, StatusClass};
pub use pipeline::{convert, Conversion, ConvertRequest, ConvertSource, DEFAULT_GAMMA, DEFAULT_MAX_SIZE};

/// Name of the decode backend, reported by health probes
pub const DECODE_BACKEND: &str = "exr";

/// Version of this crate, reported by health probes
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
