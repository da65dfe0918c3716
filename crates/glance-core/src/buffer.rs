/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A typed, interleaved pixel buffer
//!
//! The buffer is a contiguous `height × width × channels` grid of
//! samples with the channel count implied by its colorspace tag.
//! All shape invariants are checked when the buffer is built, stages
//! further down the pipeline never re-validate.
//!
//! Ownership moves stage to stage, a stage either mutates the buffer in
//! place or consumes it and returns a replacement.

use core::fmt::{Debug, Display, Formatter};

use crate::colorspace::ColorSpace;

/// Errors raised when constructing a [`PixelBuffer`]
pub enum BufferErrors {
    /// Sample count does not match `width * height * channels`
    LengthMismatch(usize, usize),
    /// One of the dimensions is zero
    ZeroDimension,
    /// `width * height * channels` overflows a usize, the buffer could
    /// never be indexed
    TooLargeDimensions(usize, usize)
}

impl Debug for BufferErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BufferErrors::LengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Sample length mismatch, expected {expected} samples but found {found}"
                )
            }
            BufferErrors::ZeroDimension => {
                writeln!(f, "Image dimensions cannot be zero")
            }
            BufferErrors::TooLargeDimensions(width, height) => {
                writeln!(
                    f,
                    "Dimensions {width}x{height} overflow usize when multiplied out"
                )
            }
        }
    }
}

impl Display for BufferErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for BufferErrors {}

/// An owned, interleaved image buffer
///
/// Samples are laid out per pixel, i.e. RGB data looks like
/// `[R,G,B,R,G,B,..]` scanning left to right, top to bottom.
///
/// The sample type is generic, the pipeline uses `f32` buffers for
/// linear HDR data and `u8` buffers once quantized for encoding.
#[derive(Clone)]
pub struct PixelBuffer<T> {
    data:       Vec<T>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl<T> PixelBuffer<T> {
    /// Create a new pixel buffer from interleaved samples
    ///
    /// # Arguments
    /// - `data`: Interleaved samples in the layout described by `colorspace`
    /// - `width`: Image width in pixels
    /// - `height`: Image height in pixels
    /// - `colorspace`: Channel layout of `data`
    ///
    /// # Returns
    /// - `Ok(buffer)`: The samples matched the described shape
    /// - `Err(e)`: Dimension and length invariants do not hold
    pub fn new(
        data: Vec<T>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer<T>, BufferErrors> {
        if width == 0 || height == 0 {
            return Err(BufferErrors::ZeroDimension);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|c| c.checked_mul(colorspace.num_components()))
            .ok_or(BufferErrors::TooLargeDimensions(width, height))?;

        if data.len() != expected {
            return Err(BufferErrors::LengthMismatch(expected, data.len()));
        }

        Ok(PixelBuffer {
            data,
            width,
            height,
            colorspace
        })
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the colorspace this buffer is tagged with
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Number of channels per pixel
    pub const fn channels(&self) -> usize {
        self.colorspace.num_components()
    }

    /// Return an immutable reference to the interleaved samples
    pub fn samples(&self) -> &[T] {
        &self.data
    }

    /// Return a mutable view into the interleaved samples
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the buffer and return the raw samples
    pub fn into_samples(self) -> Vec<T> {
        self.data
    }
}

impl<T> PixelBuffer<T> {
    /// Create a pixel buffer from samples whose shape is known to match
    ///
    /// Meant for pipeline stages that compute the sample vector from the
    /// target shape themselves; input-driven construction should use
    /// [`PixelBuffer::new`] instead.
    ///
    /// # Panics
    /// - If the length of `data` doesn't match the expected length
    ///
    /// - In case calculating the expected length overflows a [`usize`]
    pub fn from_interleaved(
        data: Vec<T>, width: usize, height: usize, colorspace: ColorSpace
    ) -> PixelBuffer<T> {
        let expected = width
            .checked_mul(height)
            .and_then(|c| c.checked_mul(colorspace.num_components()))
            .unwrap();

        assert_eq!(
            data.len(),
            expected,
            "Length mismatch, expected {expected} but found {} ",
            data.len()
        );

        PixelBuffer {
            data,
            width,
            height,
            colorspace
        }
    }
}

impl<T: Copy> PixelBuffer<T> {
    /// Create a buffer with every sample set to `value`
    ///
    /// Mainly useful for tests and synthetic inputs.
    pub fn filled(
        value: T, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer<T>, BufferErrors> {
        let len = width
            .checked_mul(height)
            .and_then(|c| c.checked_mul(colorspace.num_components()))
            .ok_or(BufferErrors::TooLargeDimensions(width, height))?;

        PixelBuffer::new(vec![value; len], width, height, colorspace)
    }
}

#[cfg(test)]
mod tests {
    use super::PixelBuffer;
    use crate::colorspace::ColorSpace;

    #[test]
    fn length_is_validated() {
        let buf = PixelBuffer::new(vec![0.0_f32; 12], 2, 2, ColorSpace::RGB);
        assert!(buf.is_ok());

        let buf = PixelBuffer::new(vec![0.0_f32; 11], 2, 2, ColorSpace::RGB);
        assert!(buf.is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let buf = PixelBuffer::new(Vec::<u8>::new(), 0, 4, ColorSpace::Luma);
        assert!(buf.is_err());
    }

    #[test]
    fn filled_matches_shape() {
        let buf = PixelBuffer::filled(1.0_f32, 5, 3, ColorSpace::RGBA).unwrap();
        assert_eq!(buf.dimensions(), (5, 3));
        assert_eq!(buf.channels(), 4);
        assert_eq!(buf.samples().len(), 5 * 3 * 4);
    }
}
