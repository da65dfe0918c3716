/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gamma tone mapping
//!
//! Compresses linear HDR radiance into the displayable `[0, 1]` range
//! with a power-law transform.
//!
//! # Algorithm
//! Every sample `v` becomes `clamp(max(v, 0) ^ (1/gamma), 0, 1)`.
//! Negative values (sensor noise can produce them) are floored before
//! exponentiation since fractional powers of negative numbers are
//! undefined in real arithmetic; the final clamp bounds extreme
//! highlights.
//!
//! The transform is per-sample and order independent; channel count and
//! dimensions are untouched.

use glance_core::buffer::PixelBuffer;

/// Apply gamma tone mapping in place
///
/// # Arguments
/// - `image`: Linear HDR samples, any channel layout
/// - `gamma`: Gamma value, must be positive; the orchestrator rejects
///   degenerate values before this stage is reached
///
/// After this call every sample lies in `[0, 1]`.
pub fn tone_map(image: &mut PixelBuffer<f32>, gamma: f32) {
    debug_assert!(gamma > 0.0);

    let inv_gamma = 1.0 / gamma;

    for sample in image.samples_mut() {
        *sample = sample.max(0.0).powf(inv_gamma).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use glance_core::buffer::PixelBuffer;
    use glance_core::colorspace::ColorSpace;
    use nanorand::{Rng, WyRand};

    use super::tone_map;

    #[test]
    fn output_is_always_in_unit_range() {
        let mut rng = WyRand::new_seed(0x1ee7);

        let mut samples = vec![0.0_f32; 64 * 64 * 3];
        for sample in &mut samples {
            // mix of negatives, sub-unit and extreme highlight values
            *sample = (rng.generate::<f32>() - 0.25) * 1000.0;
        }

        let mut image = PixelBuffer::new(samples, 64, 64, ColorSpace::RGB).unwrap();
        tone_map(&mut image, 2.2);

        for &sample in image.samples() {
            assert!((0.0..=1.0).contains(&sample), "sample {sample} escaped [0,1]");
        }
    }

    #[test]
    fn non_positive_input_maps_to_zero() {
        let samples = vec![-5.0, -0.0001, 0.0, -1e30];
        let mut image = PixelBuffer::new(samples, 2, 2, ColorSpace::Luma).unwrap();

        tone_map(&mut image, 2.2);

        assert!(image.samples().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn monotonic_for_fixed_gamma() {
        let mut rng = WyRand::new_seed(42);

        let mut values: Vec<f32> = (0..256)
            .map(|_| (rng.generate::<f32>() - 0.25) * 40.0)
            .collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut image = PixelBuffer::new(values, 16, 16, ColorSpace::Luma).unwrap();
        tone_map(&mut image, 1.8);

        for window in image.samples().windows(2) {
            assert!(window[0] <= window[1]);
        }
    }

    #[test]
    fn unit_gamma_is_clamp_only() {
        let samples = vec![0.25, 0.5, 2.0, -1.0];
        let mut image = PixelBuffer::new(samples, 2, 2, ColorSpace::Luma).unwrap();

        tone_map(&mut image, 1.0);

        assert_eq!(image.samples(), &[0.25, 0.5, 1.0, 0.0]);
    }
}
