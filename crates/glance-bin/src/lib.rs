/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

mod cmd_args;
mod cmd_parsers;
mod probe;
mod serde;
mod serve;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::setup_logger(&options);

    if *options.get_one::<bool>("probe").unwrap() {
        probe::print_health();
        return;
    }

    if *options.get_one::<bool>("serve").unwrap() {
        serve::run_loop();
        return;
    }

    if !workflow::run_single(&options) {
        exit(-1);
    }
}
