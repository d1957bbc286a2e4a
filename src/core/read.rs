//! Purpose: Read one decimal integer token from a resource file.
//! Exports: `ReadOutcome` and `read_integer`.
//! Role: Classify resource content as a value, "no value", or an open failure.
//! Invariants: A file with no leading integer token is a normal outcome, not an error.
//! Invariants: The file handle never outlives the call, on any branch.

use crate::core::error::{Error, ErrorKind};
use tracing::debug;

/// Non-error result of a resource read. Open failures travel as `Error`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadOutcome {
    Value(i64),
    Empty,
}

/// Reads `path` and scans one base-10 integer token from the start.
///
/// Leading ASCII whitespace is skipped, an optional sign is accepted, and
/// everything after the token is ignored, including non-UTF-8 bytes.
pub fn read_integer(path: &str) -> Result<ReadOutcome, Error> {
    let content = std::fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Open)
            .with_message("failed to open resource file")
            .with_path(path)
            .with_source(err)
    })?;
    let outcome = scan_integer(&content);
    debug!(path, ?outcome, "read resource");
    Ok(outcome)
}

fn scan_integer(content: &[u8]) -> ReadOutcome {
    let start = content
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(content.len());
    let rest = &content[start..];
    let sign_len = match rest.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let digits = rest[sign_len..]
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits == 0 {
        return ReadOutcome::Empty;
    }
    let token = &rest[..sign_len + digits];
    // The token is ASCII by construction; a parse failure means it does not
    // fit in i64, which classifies as "no value".
    match std::str::from_utf8(token).ok().and_then(|t| t.parse().ok()) {
        Some(value) => ReadOutcome::Value(value),
        None => ReadOutcome::Empty,
    }
}
