/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives shared by the glance conversion crates
//!
//! This crate carries the typed pixel buffer the pipeline stages hand to
//! each other, the colorspace definitions the buffer is tagged with and
//! the decoder limit options.
//!
//! It contains no image processing and no I/O, those live in
//! `glance-convert`.
#![forbid(unsafe_code)]
#![warn(clippy::correctness, clippy::perf, clippy::panic)]

pub mod buffer;
pub mod colorspace;
pub mod options;
