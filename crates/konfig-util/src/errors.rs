use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all konfig operations.
#[derive(Debug, Error, Diagnostic)]
pub enum KonfigError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed settings manifest (e.g. Konfig.toml).
    #[error("Settings error: {message}")]
    #[diagnostic(help("Check your Konfig.toml for syntax errors"))]
    Settings { message: String },

    /// The external toolchain path could not be resolved from the
    /// properties file or the environment.
    #[error("Toolchain error: {message}")]
    Toolchain { message: String },

    /// Two forced-version rules disagree on the same dependency group.
    #[error("Conflicting forced versions for group '{group}': '{first}' vs '{second}'")]
    #[diagnostic(help("Remove one of the conflicting [force] entries"))]
    RuleConflict {
        group: String,
        first: String,
        second: String,
    },

    /// Node evaluation ordering failed (unknown reference or cycle).
    #[error("Evaluation error: {message}")]
    Evaluation { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type KonfigResult<T> = miette::Result<T>;
