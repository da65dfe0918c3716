/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Line-delimited JSON serve loop
//!
//! One request per input line, one response per output line. A bad
//! request produces a failure response on its line, the loop keeps
//! going; only end of input or a broken pipe stops it.

use std::io::{BufRead, Write};

use log::{error, info};

use crate::serde::{request_from_json, ConvertResponse};

pub fn run_loop() {
    info!("Reading requests from standard input");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Could not read request line: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = handle_request(&line);

        let payload = serde_json::to_string(&response).unwrap();

        if writeln!(stdout, "{}", payload).and_then(|_| stdout.flush()).is_err() {
            // reader went away
            break;
        }
    }

    info!("Input closed, shutting down");
}

fn handle_request(body: &str) -> ConvertResponse {
    let result = request_from_json(body).and_then(glance_convert::convert);

    ConvertResponse::from_result(result)
}

#[cfg(test)]
mod tests {
    use super::handle_request;

    #[test]
    fn bad_lines_produce_failure_responses() {
        let response = handle_request("{\"gamma\": 2.2}");

        assert!(!response.is_success());
    }

    #[test]
    fn missing_files_produce_404_responses() {
        let response = handle_request("{\"file_path\": \"/no/such/glance.exr\"}");

        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":404"));
    }
}
