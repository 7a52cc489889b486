//! Resolving the text a command operates on.

use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};

use crate::commands::TextSource;

/// Resolve text from the positional argument, `--file`, or piped stdin, in
/// that order. Returns an empty string when none is given; callers treat
/// empty text as "nothing to do".
pub fn read_text(source: &TextSource) -> Result<String> {
    if let Some(text) = &source.text {
        return Ok(text.clone());
    }

    if let Some(path) = &source.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}
