/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource::CommandLine;
use clap::ArgMatches;
use glance_convert::ConvertRequest;
use glance_core::options::DecoderOptions;
use log::{info, Level};

/// Apply command line conversion overrides to a request
pub fn apply_options(options: &ArgMatches, mut request: ConvertRequest) -> ConvertRequest {
    if options.value_source("max-size") == Some(CommandLine) {
        let max_size = *options.get_one::<usize>("max-size").unwrap();
        info!("Setting max size to {}", max_size);

        request = request.set_max_size(Some(max_size));
    }
    if options.value_source("gamma") == Some(CommandLine) {
        let gamma = *options.get_one::<f32>("gamma").unwrap();
        info!("Setting gamma to {}", gamma);

        request = request.set_gamma(gamma);
    }

    let mut decoder_options = DecoderOptions::default();

    if options.value_source("max-width") == Some(CommandLine) {
        let width = *options.get_one::<usize>("max-width").unwrap();
        info!("Setting decoder max width to {}", width);

        decoder_options = decoder_options.set_max_width(width);
    }
    if options.value_source("max-height") == Some(CommandLine) {
        let height = *options.get_one::<usize>("max-height").unwrap();
        info!("Setting decoder max height to {}", height);

        decoder_options = decoder_options.set_max_height(height);
    }

    request.set_decoder_options(decoder_options)
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if *options.get_one::<bool>("debug").unwrap() {
        log_level = Level::Debug;
    } else if *options.get_one::<bool>("trace").unwrap() {
        log_level = Level::Trace;
    } else if *options.get_one::<bool>("warn").unwrap() {
        log_level = Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
