/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion errors
//!
//! Each pipeline stage raises its own error type; the orchestrator maps
//! those into [`ConvertErrors`], the only error type callers see. The
//! five [`ConvertErrorKind`] values form the complete external taxonomy,
//! backend internals never leak past this module.

use core::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use glance_core::colorspace::ColorSpace;

/// Errors raised while decoding an HDR source into a pixel buffer
pub enum DecodeErrors {
    /// The backend could not parse the input as an EXR image
    Exr(exr::error::Error),
    /// Decoded successfully but the channel layout is not one the
    /// pipeline renders
    UnsupportedChannelCount(usize),
    /// A channel is stored at reduced resolution, interleaving it would
    /// require resampling the decoder does not do
    SubsampledChannel(String),
    /// Too large dimensions for a given dimension
    TooLargeDimensions(&'static str, usize, usize),
    /// A channel's sample count does not match the layer dimensions
    ChannelSizeMismatch(usize, usize),
    /// Generic message
    Generic(&'static str)
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeErrors::Exr(err) => {
                writeln!(f, "EXR decoding failed: {}", err)
            }
            DecodeErrors::UnsupportedChannelCount(count) => {
                writeln!(
                    f,
                    "Unsupported channel layout, found {count} channels but only 1, 3 or 4 can be rendered"
                )
            }
            DecodeErrors::SubsampledChannel(name) => {
                writeln!(f, "Channel {name:?} is subsampled, cannot interleave")
            }
            DecodeErrors::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            DecodeErrors::ChannelSizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "Channel sample count mismatch, expected {expected} samples but found {found}"
                )
            }
            DecodeErrors::Generic(error) => {
                writeln!(f, "{error}")
            }
        }
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for DecodeErrors {}

impl From<exr::error::Error> for DecodeErrors {
    fn from(value: exr::error::Error) -> Self {
        DecodeErrors::Exr(value)
    }
}

/// Errors raised while producing the final compressed bytes
pub enum EncodeErrors {
    /// The JPEG encoder reported an internal failure
    Jpeg(jpeg_encoder::EncodingError),
    /// Image dimensions exceed what the container can express
    TooLargeDimensions(usize, usize),
    /// The colorspace reaching the encoder is not RGB or grayscale
    UnsupportedColorspace(ColorSpace),
    /// Generic message
    Static(&'static str)
}

impl Debug for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeErrors::Jpeg(err) => {
                writeln!(f, "JPEG encoding failed: {}", err)
            }
            EncodeErrors::TooLargeDimensions(width, height) => {
                writeln!(
                    f,
                    "Dimensions {width}x{height} exceed the JPEG limit of 65535"
                )
            }
            EncodeErrors::UnsupportedColorspace(colorspace) => {
                writeln!(
                    f,
                    "Unsupported colorspace {colorspace:?} for JPEG encoding, expected RGB or Luma"
                )
            }
            EncodeErrors::Static(err) => writeln!(f, "{}", err)
        }
    }
}

impl Display for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for EncodeErrors {}

impl From<jpeg_encoder::EncodingError> for EncodeErrors {
    fn from(value: jpeg_encoder::EncodingError) -> Self {
        EncodeErrors::Jpeg(value)
    }
}

/// All errors a conversion request can end in
///
/// This is what [`convert`](crate::pipeline::convert) returns; every
/// variant corresponds to exactly one [`ConvertErrorKind`].
pub enum ConvertErrors {
    /// A request parameter is missing or outside its allowed range.
    /// Reported before any stage runs.
    InvalidParameter(&'static str, String),
    /// The source path does not resolve to a readable file
    NotFound(PathBuf),
    /// Bytes were present but could not be decoded as an HDR image
    Decode(DecodeErrors),
    /// Decoded successfully but with a channel layout outside {1,3,4}
    UnsupportedFormat(usize),
    /// Producing the final compressed bytes failed
    Encode(EncodeErrors)
}

impl ConvertErrors {
    /// The taxonomy kind of this error
    pub const fn kind(&self) -> ConvertErrorKind {
        match self {
            ConvertErrors::InvalidParameter(..) => ConvertErrorKind::InvalidParameter,
            ConvertErrors::NotFound(_) => ConvertErrorKind::NotFound,
            ConvertErrors::Decode(_) => ConvertErrorKind::Decode,
            ConvertErrors::UnsupportedFormat(_) => ConvertErrorKind::UnsupportedFormat,
            ConvertErrors::Encode(_) => ConvertErrorKind::Encode
        }
    }
}

impl Debug for ConvertErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConvertErrors::InvalidParameter(name, reason) => {
                writeln!(f, "Invalid parameter {name:?}: {reason}")
            }
            ConvertErrors::NotFound(path) => {
                writeln!(f, "File not found: {}", path.display())
            }
            ConvertErrors::Decode(err) => writeln!(f, "{:?}", err),
            ConvertErrors::UnsupportedFormat(count) => {
                writeln!(
                    f,
                    "Unsupported channel layout, found {count} channels but only 1, 3 or 4 can be rendered"
                )
            }
            ConvertErrors::Encode(err) => writeln!(f, "{:?}", err)
        }
    }
}

impl Display for ConvertErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ConvertErrors {}

impl From<DecodeErrors> for ConvertErrors {
    fn from(value: DecodeErrors) -> Self {
        // an unsupported layout is its own outcome, not a decode failure
        match value {
            DecodeErrors::UnsupportedChannelCount(count) => {
                ConvertErrors::UnsupportedFormat(count)
            }
            other => ConvertErrors::Decode(other)
        }
    }
}

impl From<EncodeErrors> for ConvertErrors {
    fn from(value: EncodeErrors) -> Self {
        ConvertErrors::Encode(value)
    }
}

/// The five stable error kinds of the external contract
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConvertErrorKind {
    InvalidParameter,
    NotFound,
    Decode,
    UnsupportedFormat,
    Encode
}

impl ConvertErrorKind {
    /// Classify this kind for transports that speak in status classes
    pub const fn status_class(self) -> StatusClass {
        match self {
            ConvertErrorKind::InvalidParameter => StatusClass::ClientError,
            ConvertErrorKind::NotFound => StatusClass::NotFound,
            ConvertErrorKind::Decode
            | ConvertErrorKind::UnsupportedFormat
            | ConvertErrorKind::Encode => StatusClass::ServerError
        }
    }
}

/// Coarse status classification a transport adapter can map onto its
/// own status codes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StatusClass {
    /// The request itself was malformed
    ClientError,
    /// There was nothing at the requested source
    NotFound,
    /// The source existed but converting it failed
    ServerError
}
