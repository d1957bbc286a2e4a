//! Purpose: Module-relative sibling path resolution.
//! Exports: `resolve_sibling`.
//! Role: Keep ABI and CLI resource-path semantics aligned from one source.
//! Invariants: Resolution is pure string work; nothing here touches the filesystem.
//! Invariants: The module's own path must contain at least one path separator.

use crate::core::error::{Error, ErrorKind};

/// Replaces the final segment of `module_path` with `filename`.
///
/// The prefix up to and including the last path separator is kept verbatim:
/// no normalization, no symlink resolution. Whatever the OS makes of the
/// result at open time is the caller's concern.
pub fn resolve_sibling(module_path: &str, filename: &str) -> Result<String, Error> {
    let Some(last_sep) = module_path.rfind(std::path::is_separator) else {
        return Err(Error::new(ErrorKind::InvalidModulePath)
            .with_message("no separator in module path")
            .with_path(module_path));
    };
    // Path separators are ASCII, so the prefix ends one byte past the match.
    let dir = &module_path[..last_sep + 1];
    let mut sibling = String::with_capacity(dir.len() + filename.len());
    sibling.push_str(dir);
    sibling.push_str(filename);
    Ok(sibling)
}
