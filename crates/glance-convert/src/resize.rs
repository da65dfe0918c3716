/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bounded, aspect-preserving downscale
//!
//! Fits an image inside a `max_size × max_size` box. Images already
//! inside the box are returned untouched, upscaling never happens.
//!
//! Resampling is a separable Lanczos-3 convolution with per-output-pixel
//! precomputed kernels. The filter support is widened by the downscale
//! ratio so that every source pixel contributes to some output pixel;
//! thumbnails are strong minifications and a fixed-width kernel would
//! skip source rows and alias.

use glance_core::buffer::PixelBuffer;
use log::trace;

/// A single output pixel's resampling weights
///
/// `start` indexes the first contributing input sample; weights are
/// normalized to sum to one.
struct ResampleKernel {
    start:   usize,
    weights: Vec<f32>
}

/// Resize an image so that both dimensions fit within `max_size`
///
/// # Arguments
/// - `image`: 8-bit source buffer, any channel layout
/// - `max_size`: Positive bounding dimension; validated upstream by the
///   orchestrator
///
/// # Returns
/// The input unchanged when it already fits, otherwise a downscaled
/// buffer whose larger dimension equals `max_size` and whose other
/// dimension is proportionally scaled, rounded, and floored at one
/// pixel.
pub fn resize_to_fit(image: PixelBuffer<u8>, max_size: usize) -> PixelBuffer<u8> {
    debug_assert!(max_size > 0);

    let (width, height) = image.dimensions();

    if width <= max_size && height <= max_size {
        trace!("Image {width}x{height} already fits within {max_size}, not resizing");
        return image;
    }

    let scale = max_size as f64 / width.max(height) as f64;

    let out_width = if width >= height {
        max_size
    } else {
        (((width as f64) * scale).round() as usize).max(1)
    };
    let out_height = if height >= width {
        max_size
    } else {
        (((height as f64) * scale).round() as usize).max(1)
    };

    trace!("Resizing {width}x{height} -> {out_width}x{out_height}");

    let h_kernels = precompute_kernels(width, out_width);
    let v_kernels = precompute_kernels(height, out_height);

    let components = image.channels();
    let samples = image.samples();

    let mut plane = vec![0.0_f32; width * height];
    let mut mid = vec![0.0_f32; height * out_width];
    let mut out_plane = vec![0.0_f32; out_height * out_width];
    let mut out_data = vec![0_u8; out_width * out_height * components];

    for channel in 0..components {
        for (plane_px, px) in plane
            .iter_mut()
            .zip(samples.iter().skip(channel).step_by(components))
        {
            *plane_px = f32::from(*px);
        }

        resample_rows(&plane, width, &mut mid, out_width, &h_kernels);
        resample_columns(&mid, out_width, &mut out_plane, out_height, &v_kernels);

        for (value, out) in out_plane
            .iter()
            .zip(out_data.iter_mut().skip(channel).step_by(components))
        {
            *out = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    PixelBuffer::from_interleaved(out_data, out_width, out_height, image.colorspace())
}

/// Horizontal pass: every input row convolved down to `out_width`
fn resample_rows(
    input: &[f32], in_width: usize, output: &mut [f32], out_width: usize,
    kernels: &[ResampleKernel]
) {
    for (in_row, out_row) in input
        .chunks_exact(in_width)
        .zip(output.chunks_exact_mut(out_width))
    {
        for (out_pixel, kernel) in out_row.iter_mut().zip(kernels.iter()) {
            *out_pixel = in_row[kernel.start..]
                .iter()
                .zip(kernel.weights.iter())
                .map(|(&pixel, &weight)| pixel * weight)
                .sum();
        }
    }
}

/// Vertical pass: every column convolved down to `out_height`
fn resample_columns(
    input: &[f32], width: usize, output: &mut [f32], out_height: usize,
    kernels: &[ResampleKernel]
) {
    for (out_y, kernel) in kernels.iter().enumerate().take(out_height) {
        let out_row = &mut output[out_y * width..(out_y + 1) * width];

        for (x, out_pixel) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0;

            for (tap, &weight) in kernel.weights.iter().enumerate() {
                sum += input[(kernel.start + tap) * width + x] * weight;
            }

            *out_pixel = sum;
        }
    }
}

/// Precompute one normalized kernel per output position
fn precompute_kernels(in_size: usize, out_size: usize) -> Vec<ResampleKernel> {
    const RADIUS: f32 = 3.0;

    let ratio = in_size as f32 / out_size as f32;
    // widen the filter when minifying, identity-width otherwise
    let filter_scale = ratio.max(1.0);
    let support = RADIUS * filter_scale;

    let mut kernels = Vec::with_capacity(out_size);

    for out_pos in 0..out_size {
        let src_pos = (out_pos as f32 + 0.5) * ratio - 0.5;

        let start = ((src_pos - support).floor().max(0.0)) as usize;
        let end = (((src_pos + support).ceil()) as usize).min(in_size - 1);

        let mut weights = Vec::with_capacity(end - start + 1);
        let mut weight_sum = 0.0;

        for position in start..=end {
            let distance = (position as f32 - src_pos) / filter_scale;
            let weight = lanczos3(distance);

            weights.push(weight);
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            let inv_sum = 1.0 / weight_sum;
            for weight in &mut weights {
                *weight *= inv_sum;
            }
        }

        kernels.push(ResampleKernel { start, weights });
    }

    kernels
}

/// Lanczos kernel with a = 3
#[inline]
fn lanczos3(x: f32) -> f32 {
    const A: f32 = 3.0;

    let x = x.abs();

    if x < 1e-6 {
        return 1.0;
    }

    if x < A {
        let pi_x = std::f32::consts::PI * x;
        let pi_x_a = pi_x / A;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use glance_core::buffer::PixelBuffer;
    use glance_core::colorspace::ColorSpace;

    use super::resize_to_fit;

    #[test]
    fn no_upscaling_ever_happens() {
        let image = PixelBuffer::filled(90_u8, 500, 300, ColorSpace::RGB).unwrap();

        let out = resize_to_fit(image, 1000);

        assert_eq!(out.dimensions(), (500, 300));
    }

    #[test]
    fn fits_the_larger_dimension_exactly() {
        let image = PixelBuffer::filled(90_u8, 500, 300, ColorSpace::RGB).unwrap();

        let out = resize_to_fit(image, 250);

        assert_eq!(out.dimensions(), (250, 150));
    }

    #[test]
    fn portrait_orientation_scales_height() {
        let image = PixelBuffer::filled(13_u8, 300, 500, ColorSpace::Luma).unwrap();

        let out = resize_to_fit(image, 250);

        assert_eq!(out.dimensions(), (150, 250));
    }

    #[test]
    fn aspect_ratio_held_within_one_pixel() {
        let image = PixelBuffer::filled(200_u8, 1920, 1080, ColorSpace::RGB).unwrap();

        let out = resize_to_fit(image, 333);
        let (out_w, out_h) = out.dimensions();

        assert_eq!(out_w, 333);

        let exact = 1080.0_f64 * 333.0 / 1920.0;
        assert!((out_h as f64 - exact).abs() <= 1.0);
    }

    #[test]
    fn never_collapses_below_one_pixel() {
        let image = PixelBuffer::filled(7_u8, 2048, 2, ColorSpace::Luma).unwrap();

        let out = resize_to_fit(image, 100);

        assert_eq!(out.dimensions(), (100, 1));
    }

    #[test]
    fn flat_images_stay_flat() {
        // normalized kernels must not change a constant image
        let image = PixelBuffer::filled(173_u8, 64, 48, ColorSpace::RGB).unwrap();

        let out = resize_to_fit(image, 16);

        assert!(out.samples().iter().all(|&v| v == 173));
    }
}
