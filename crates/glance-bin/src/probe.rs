/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::serde::HealthProbe;

/// Print a liveness and backend report to standard output
pub fn print_health() {
    let probe = HealthProbe::current();

    println!("{}", serde_json::to_string_pretty(&probe).unwrap());
}
