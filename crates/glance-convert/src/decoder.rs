/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! OpenEXR decoding
//!
//! Turns raw EXR bytes or a file path into an interleaved `f32`
//! [`PixelBuffer`] with channels in R,G,B[,A] order.
//!
//! EXR files store their channels as separate planes sorted
//! alphabetically, so a color image arrives as A,B,G,R. Everything
//! downstream assumes RGB ordering, which makes reordering a decoder
//! responsibility: when the layer carries the conventional R/G/B/A
//! channel names we use those, otherwise the file order is kept as-is
//! and channel count alone decides the layout.
//!
//! Values come back at full floating point precision with the source's
//! dynamic range intact; nothing here clamps or tone maps.

use std::io::Cursor;
use std::path::Path;

use exr::prelude::{AnyChannel, AnyChannels, FlatSamples, Image, Layer, ReadChannels, ReadLayers};
use glance_core::buffer::PixelBuffer;
use glance_core::colorspace::ColorSpace;
use glance_core::options::DecoderOptions;
use log::trace;

use crate::errors::DecodeErrors;

type FlatImage = Image<Layer<AnyChannels<FlatSamples>>>;

/// Decode an EXR file from a path
///
/// # Arguments
/// - `path`: Path to the EXR file
/// - `options`: Limits applied before pixel storage is allocated
///
/// # Returns
/// - `Ok(buffer)`: Interleaved f32 samples in R,G,B[,A] or grayscale order
/// - `Err(e)`: The file was not a decodable EXR image within limits
pub fn decode_file<P: AsRef<Path>>(
    path: P, options: DecoderOptions
) -> Result<PixelBuffer<f32>, DecodeErrors> {
    let image = exr::prelude::read()
        .no_deep_data()
        .largest_resolution_level()
        .all_channels()
        .first_valid_layer()
        .all_attributes()
        .from_file(path)?;

    buffer_from_image(image, options)
}

/// Decode an EXR image already held in memory
pub fn decode_bytes(data: &[u8], options: DecoderOptions) -> Result<PixelBuffer<f32>, DecodeErrors> {
    let image = exr::prelude::read()
        .no_deep_data()
        .largest_resolution_level()
        .all_channels()
        .first_valid_layer()
        .all_attributes()
        .from_buffered(Cursor::new(data))?;

    buffer_from_image(image, options)
}

fn buffer_from_image(
    image: FlatImage, options: DecoderOptions
) -> Result<PixelBuffer<f32>, DecodeErrors> {
    let layer = &image.layer_data;

    let width = layer.size.width();
    let height = layer.size.height();

    if width == 0 || height == 0 {
        return Err(DecodeErrors::Generic("image has zero dimensions"));
    }
    if width > options.max_width() {
        return Err(DecodeErrors::TooLargeDimensions(
            "width",
            options.max_width(),
            width
        ));
    }
    if height > options.max_height() {
        return Err(DecodeErrors::TooLargeDimensions(
            "height",
            options.max_height(),
            height
        ));
    }

    let channels = &layer.channel_data.list;

    let colorspace = ColorSpace::from_channel_count(channels.len())
        .ok_or(DecodeErrors::UnsupportedChannelCount(channels.len()))?;

    trace!(
        "Decoded EXR layer: {}x{}, {} channels, treating as {:?}",
        width,
        height,
        channels.len(),
        colorspace
    );

    let ordered = order_channels(channels);

    let components = colorspace.num_components();
    let pixel_count = width * height;

    let mut data = vec![0.0_f32; pixel_count * components];

    for (slot, channel) in ordered.iter().enumerate() {
        if channel.sampling.width() != 1 || channel.sampling.height() != 1 {
            return Err(DecodeErrors::SubsampledChannel(channel.name.to_string()));
        }
        if channel.sample_data.len() != pixel_count {
            return Err(DecodeErrors::ChannelSizeMismatch(
                pixel_count,
                channel.sample_data.len()
            ));
        }
        // half and u32 storage widen losslessly to f32 here
        for (i, value) in channel.sample_data.values_as_f32().enumerate() {
            data[i * components + slot] = value;
        }
    }

    Ok(PixelBuffer::from_interleaved(
        data, width, height, colorspace
    ))
}

/// Arrange the layer's channels into the order downstream stages expect
///
/// EXR sorts channels alphabetically on disk; when the conventional
/// R/G/B/A names are present we restore display order. Layers with
/// unconventional names keep file order, channel count alone then
/// decides how they are interpreted.
fn order_channels(channels: &[AnyChannel<FlatSamples>]) -> Vec<&AnyChannel<FlatSamples>> {
    let wanted: &[&str] = match channels.len() {
        3 => &["R", "G", "B"],
        4 => &["R", "G", "B", "A"],
        _ => return channels.iter().collect()
    };

    let names: Vec<String> = channels.iter().map(|c| c.name.to_string()).collect();

    let mut ordered = Vec::with_capacity(channels.len());

    for want in wanted {
        match names.iter().position(|name| name == want) {
            Some(position) => ordered.push(&channels[position]),
            // unconventional naming, fall back to file order
            None => return channels.iter().collect()
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use glance_core::options::DecoderOptions;

    use super::decode_bytes;
    use crate::errors::DecodeErrors;

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let result = decode_bytes(b"not an exr file at all", DecoderOptions::default());

        assert!(matches!(result, Err(DecodeErrors::Exr(_))));
    }

    #[test]
    fn truncated_magic_is_a_decode_error() {
        // the real magic is 0x76 0x2f 0x31 0x01
        let result = decode_bytes(&[0x76, 0x2f], DecoderOptions::default());

        assert!(matches!(result, Err(DecodeErrors::Exr(_))));
    }
}
