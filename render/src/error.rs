//! Error types for help rendering.
//!
//! Rendering itself is best-effort; only precondition violations and
//! configuration I/O surface as errors.

use thiserror::Error;

/// Errors that can occur while configuring or building help text.
#[derive(Debug, Error)]
pub enum HelpError {
    /// The line wrapper was asked for a zero-column budget.
    #[error("wrap width must be at least 1")]
    InvalidWrapWidth,

    /// The help builder was given a successful parse outcome.
    #[error("expected a not-parsed result")]
    ExpectedNotParsedResult,

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`HelpError`].
pub type Result<T> = std::result::Result<T, HelpError>;
