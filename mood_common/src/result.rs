//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `MoodError`, so functions can simply return `Result<T>`.
use crate::error::MoodError;

/// Workspace-wide `Result` alias with `MoodError` as the default error.
pub type Result<T, E = MoodError> = std::result::Result<T, E>;
