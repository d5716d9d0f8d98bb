use serde_json::Value;
use std::io::{self, Read};

/// Read piped loan parameters as JSON from stdin.
///
/// Returns None when stdin is an interactive TTY or the pipe carries
/// nothing but whitespace, so flag-based invocation still works.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let piped = buffer.trim();
    if piped.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(piped)?))
}
