//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `DivinationError`, so functions can simply
//! return `Result<T>`.
use crate::error::DivinationError;

/// Workspace-wide `Result` alias with `DivinationError` as the default error.
pub type Result<T, E = DivinationError> = std::result::Result<T, E>;
