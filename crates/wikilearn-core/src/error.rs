//! Typed errors for the operations callers need to tell apart.
//!
//! File and configuration glue uses `anyhow` with context instead; these
//! enums pass through it untouched and can be recovered with
//! `anyhow::Error::downcast_ref`.

use thiserror::Error;

/// Failure while pinning development dependencies to release tags.
///
/// Both kinds are fatal for a metadata build: the pass stops at the first
/// failing declaration and produces no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("Invalid dependency format: '{declaration}' has no '@' reference")]
    InvalidDependencyFormat { declaration: String },

    #[error("Failed to resolve latest release for '{repository}': {reason}")]
    ResolutionFailed { repository: String, reason: String },
}

impl PinError {
    pub(crate) fn resolution(repository: &str, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            repository: repository.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure of the host `plugins enable` invocation.
#[derive(Debug, Error)]
pub enum EnableError {
    #[error("Command failed: {stderr}")]
    SubprocessFailed { status: Option<i32>, stderr: String },

    #[error("Unexpected error: {0}")]
    Spawn(#[from] std::io::Error),
}
