/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("glance")
        .about("Convert OpenEXR images into base64 JPEG thumbnails")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input EXR file to convert")
            .action(ArgAction::Set))
        .arg(Arg::new("max-size")
            .long("max-size")
            .help_heading("CONVERSION")
            .help("Bounding dimension of the thumbnail in pixels")
            .long_help("Bounding dimension of the thumbnail in pixels.\nThe larger side of the image is scaled down to this, the other side keeps the aspect ratio. Images already within bounds are left unscaled.")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("gamma")
            .long("gamma")
            .help_heading("CONVERSION")
            .help("Gamma value used to tone map HDR radiance")
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help_heading("MODES")
            .help("Print a liveness and backend report as JSON, then exit"))
        .arg(Arg::new("serve")
            .long("serve")
            .action(ArgAction::SetTrue)
            .help_heading("MODES")
            .help("Read line-delimited JSON requests from standard input")
            .long_help("Read line-delimited JSON requests from standard input.\nEach line is a request object, each response is written as a single JSON line on standard output."))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum image width the decoder accepts")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum image height the decoder accepts")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the conversion options"))
}
