/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colorspace information for pipeline buffers.

/// Colorspaces a [`PixelBuffer`](crate::buffer::PixelBuffer) can be
/// tagged with.
///
/// The pipeline only admits interleaved grayscale, RGB and RGBA data,
/// anything else must be rejected at decode time.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorSpace {
    /// Grayscale colorspace
    Luma,
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    /// Map a decoded channel count to a colorspace.
    ///
    /// Channel count is the only normalization signal the pipeline uses,
    /// a three channel image is taken to be RGB and a four channel one
    /// RGBA, matching how the decoder orders channels before handing
    /// them over.
    ///
    /// # Returns
    /// - `Some(colorspace)`: channel count is one this pipeline renders
    /// - `None`: layout is unsupported and should be reported as such
    pub const fn from_channel_count(channels: usize) -> Option<ColorSpace> {
        match channels {
            1 => Some(ColorSpace::Luma),
            3 => Some(ColorSpace::RGB),
            4 => Some(ColorSpace::RGBA),
            _ => None
        }
    }
}

/// All colorspaces supported by the pipeline
pub static ALL_COLORSPACES: [ColorSpace; 3] =
    [ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA];

#[cfg(test)]
mod tests {
    use super::ColorSpace;

    #[test]
    fn channel_count_round_trips() {
        for colorspace in super::ALL_COLORSPACES {
            assert_eq!(
                ColorSpace::from_channel_count(colorspace.num_components()),
                Some(colorspace)
            );
        }
    }

    #[test]
    fn unsupported_channel_counts_are_rejected() {
        for count in [0, 2, 5, 17] {
            assert_eq!(ColorSpace::from_channel_count(count), None);
        }
    }
}
