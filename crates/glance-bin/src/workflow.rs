/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use glance_convert::{convert, ConvertErrors, ConvertRequest};
use log::info;

use crate::cmd_parsers::apply_options;
use crate::serde::ConvertResponse;

/// Run a single conversion from command line arguments
///
/// Prints the wire response to standard output either way and reports
/// whether the conversion succeeded.
pub fn run_single(options: &ArgMatches) -> bool {
    let result = request_from_cmd(options).and_then(convert);

    let response = ConvertResponse::from_result(result);

    println!("{}", serde_json::to_string_pretty(&response).unwrap());

    response.is_success()
}

fn request_from_cmd(options: &ArgMatches) -> Result<ConvertRequest, ConvertErrors> {
    let Some(input) = options.get_one::<String>("in") else {
        return Err(ConvertErrors::InvalidParameter(
            "file_path",
            String::from("no input file, pass one with -i/--input")
        ));
    };

    info!("Converting {}", input);

    Ok(apply_options(options, ConvertRequest::from_path(input)))
}
