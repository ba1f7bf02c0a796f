//! Username list loading.

use crate::error::{Error, Result};
use std::path::Path;

/// Read one username per line, trimming whitespace and skipping blank lines.
pub fn read_usernames(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Input(format!("cannot read {}: {e}", path.display())))?;
    Ok(parse_usernames(&content))
}

pub fn parse_usernames(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
