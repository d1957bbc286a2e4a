//! Purpose: Define the stable public API boundary for extprobe.
//! Exports: Module handle, outcome, and error types needed by the ABI and CLI.
//! Role: Public, additive-only surface; hides core module internals.
//! Invariants: This module is the only public path callers should depend on.

mod module;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::read::ReadOutcome;
pub use module::{ApiResult, Module, ANSWER_RESOURCE, THE_ANSWER};
