/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! Limits the decode stage applies before allocating pixel storage.
//! The same `DecoderOptions` value can be reused across requests.

/// Decoder options
///
/// These bound how large an image the decoder will agree to inflate
/// into memory; headers are still parsed for oversized files so the
/// rejection carries real dimensions.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    max_width:  usize,
    max_height: usize
}

impl DecoderOptions {
    /// Get the maximum width the decoder accepts
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height the decoder accepts
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Set the maximum image width the decoder accepts
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum image height the decoder accepts
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:  1 << 14,
            max_height: 1 << 14
        }
    }
}
