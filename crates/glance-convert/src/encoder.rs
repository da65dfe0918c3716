/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG encoding and data URI packaging
//!
//! Compresses an 8-bit buffer at a fixed quality and wraps the result
//! as a `data:image/jpeg;base64,` URI so transports can embed it in a
//! JSON response without a second request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use glance_core::buffer::PixelBuffer;
use glance_core::colorspace::ColorSpace;
use jpeg_encoder::{ColorType, Encoder};
use log::trace;

use crate::errors::EncodeErrors;

/// Fixed encode quality, tuned for gallery previews
pub const JPEG_QUALITY: u8 = 90;

/// Prefix of every successful conversion payload
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode an 8-bit buffer into JPEG bytes at [`JPEG_QUALITY`]
///
/// # Arguments
/// - `image`: Grayscale or RGB buffer, normalization guarantees alpha
///   was flattened before this stage
///
/// # Returns
/// - `Ok(bytes)`: A complete JFIF stream
/// - `Err(e)`: The buffer shape cannot be expressed as a baseline JPEG
pub fn encode_jpeg(image: &PixelBuffer<u8>) -> Result<Vec<u8>, EncodeErrors> {
    let (width, height) = image.dimensions();

    if width > usize::from(u16::MAX) || height > usize::from(u16::MAX) {
        return Err(EncodeErrors::TooLargeDimensions(width, height));
    }

    let color_type = match image.colorspace() {
        ColorSpace::Luma => ColorType::Luma,
        ColorSpace::RGB => ColorType::Rgb,
        other => return Err(EncodeErrors::UnsupportedColorspace(other))
    };

    let mut bytes = Vec::new();

    let encoder = Encoder::new(&mut bytes, JPEG_QUALITY);
    encoder.encode(image.samples(), width as u16, height as u16, color_type)?;

    trace!("Encoded {width}x{height} image into {} JPEG bytes", bytes.len());

    Ok(bytes)
}

/// Encode a buffer and wrap it as a base64 data URI
pub fn encode_data_uri(image: &PixelBuffer<u8>) -> Result<String, EncodeErrors> {
    let bytes = encode_jpeg(image)?;

    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + (bytes.len() * 4).div_ceil(3) + 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(&bytes, &mut uri);

    Ok(uri)
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use glance_core::buffer::PixelBuffer;
    use glance_core::colorspace::ColorSpace;

    use super::{encode_data_uri, encode_jpeg, DATA_URI_PREFIX};
    use crate::errors::EncodeErrors;

    #[test]
    fn jpeg_stream_has_jfif_markers() {
        let image = PixelBuffer::filled(128_u8, 16, 16, ColorSpace::RGB).unwrap();

        let bytes = encode_jpeg(&image).unwrap();

        // SOI at the start, EOI at the end
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn grayscale_input_encodes() {
        let image = PixelBuffer::filled(64_u8, 8, 8, ColorSpace::Luma).unwrap();

        assert!(encode_jpeg(&image).is_ok());
    }

    #[test]
    fn alpha_never_reaches_the_encoder() {
        let image = PixelBuffer::filled(0_u8, 4, 4, ColorSpace::RGBA).unwrap();

        let result = encode_jpeg(&image);

        assert!(matches!(
            result,
            Err(EncodeErrors::UnsupportedColorspace(ColorSpace::RGBA))
        ));
    }

    #[test]
    fn data_uri_round_trips_through_base64() {
        let image = PixelBuffer::filled(200_u8, 12, 9, ColorSpace::RGB).unwrap();

        let uri = encode_data_uri(&image).unwrap();

        assert!(uri.starts_with(DATA_URI_PREFIX));

        let payload = &uri[DATA_URI_PREFIX.len()..];
        let decoded = STANDARD.decode(payload).unwrap();

        assert_eq!(decoded, encode_jpeg(&image).unwrap());
    }
}
