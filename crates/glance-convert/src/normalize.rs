/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color-mode normalization and quantization
//!
//! Takes a tone-mapped `[0, 1]` buffer and produces the 8-bit buffer the
//! encoder consumes. Grayscale and RGB pass through; RGBA is composited
//! over an opaque white background, which is what a gallery tile sits
//! on.
//!
//! Compositing runs in float before quantization. Rounding each channel
//! first and then blending would bake quantization error into the blend
//! and show up as banding in soft alpha gradients.

use glance_core::buffer::PixelBuffer;
use glance_core::colorspace::ColorSpace;
use log::trace;

/// Background the alpha channel is composited against, as a unit-range
/// intensity (opaque white).
const BACKGROUND: f32 = 1.0;

/// Quantize a unit-range sample to 8 bits
#[inline]
fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert a tone-mapped buffer into an encodable 8-bit buffer
///
/// # Arguments
/// - `image`: Samples in `[0, 1]`, channels ∈ {1, 3, 4}
///
/// # Returns
/// An 8-bit buffer that is either grayscale or RGB; this is the only
/// stage allowed to change the channel count.
pub fn to_display(image: PixelBuffer<f32>) -> PixelBuffer<u8> {
    let (width, height) = image.dimensions();
    let colorspace = image.colorspace();

    if !colorspace.has_alpha() {
        let data = image.into_samples().iter().map(|&v| to_u8(v)).collect();

        return PixelBuffer::from_interleaved(data, width, height, colorspace);
    }

    trace!("Compositing alpha over white background");

    let mut data = Vec::with_capacity(width * height * 3);

    for pixel in image.samples().chunks_exact(4) {
        let alpha = pixel[3];

        for &channel in &pixel[..3] {
            data.push(to_u8(alpha * channel + (1.0 - alpha) * BACKGROUND));
        }
    }

    PixelBuffer::from_interleaved(data, width, height, ColorSpace::RGB)
}

#[cfg(test)]
mod tests {
    use glance_core::buffer::PixelBuffer;
    use glance_core::colorspace::ColorSpace;

    use super::to_display;

    #[test]
    fn grayscale_passes_through() {
        let image = PixelBuffer::new(vec![0.0, 0.5, 1.0, 0.25], 2, 2, ColorSpace::Luma).unwrap();

        let display = to_display(image);

        assert_eq!(display.colorspace(), ColorSpace::Luma);
        assert_eq!(display.samples(), &[0, 128, 255, 64]);
    }

    #[test]
    fn rgb_passes_through() {
        let image = PixelBuffer::filled(1.0_f32, 3, 2, ColorSpace::RGB).unwrap();

        let display = to_display(image);

        assert_eq!(display.colorspace(), ColorSpace::RGB);
        assert_eq!(display.dimensions(), (3, 2));
        assert!(display.samples().iter().all(|&v| v == 255));
    }

    #[test]
    fn transparent_pixels_become_white() {
        // alpha = 0, any foreground color
        let pixel = [0.2_f32, 0.9, 0.4, 0.0];
        let image = PixelBuffer::new(pixel.repeat(4), 2, 2, ColorSpace::RGBA).unwrap();

        let display = to_display(image);

        assert_eq!(display.colorspace(), ColorSpace::RGB);
        assert!(display.samples().iter().all(|&v| v == 255));
    }

    #[test]
    fn opaque_pixels_keep_their_color() {
        let pixel = [0.2_f32, 0.9, 0.4, 1.0];
        let image = PixelBuffer::new(pixel.repeat(4), 2, 2, ColorSpace::RGBA).unwrap();

        let display = to_display(image);

        for rgb in display.samples().chunks_exact(3) {
            assert_eq!(rgb, &[51, 230, 102]);
        }
    }

    #[test]
    fn half_alpha_blends_toward_white() {
        let pixel = [0.0_f32, 0.0, 0.0, 0.5];
        let image = PixelBuffer::new(pixel.repeat(1), 1, 1, ColorSpace::RGBA).unwrap();

        let display = to_display(image);

        // 0.5 * 0 + 0.5 * 255
        assert_eq!(display.samples(), &[128, 128, 128]);
    }
}
