//! Terminal I/O utilities for CLI.
//!
//! Prompts go to stderr so stdout stays reserved for the JSON response.

use std::io::{self, BufRead, Write};

pub fn prompt(message: &str) -> standup::Result<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).map_err(|e| {
        standup::Error::internal_io(
            format!("Failed to read input: {}", e),
            Some("prompt".to_string()),
        )
    })?;

    Ok(line.trim().to_string())
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
