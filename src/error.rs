//! Error types for the context propagation manager.

use thiserror::Error;

/// Failures reported by a [`FramePlatform`](crate::platform::FramePlatform)
/// implementation.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("frame identifier space exhausted")]
    FrameExhausted,

    #[error("frame-scope creation failed: {0}")]
    ScopeCreation(String),
}

/// Errors surfaced by [`ContextManager`](crate::manager::ContextManager)
/// operations.
///
/// Absence of a context value is not an error (lookups return `Option`), and
/// removing an unbound value is a no-op; the only failure mode on the public
/// surface is the platform refusing to create a frame-scope during a set.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging configuration: {0}")]
    InvalidConfig(String),
}
