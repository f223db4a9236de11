use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for Pantry operations that sit above the resolver.
#[derive(Debug, Error, Diagnostic)]
pub enum PantryError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project manifest (`pantry.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your pantry.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid global configuration (`~/.pantry/config.toml`).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check ~/.pantry/config.toml, or set PANTRY_HOME to another directory"))]
    Config { message: String },

    /// Unreadable or malformed lock file (`pantry.lock`).
    #[error("Lock file error: {message}")]
    #[diagnostic(help("Delete pantry.lock and run `pantry lock` to regenerate it"))]
    Lockfile { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PantryResult<T> = miette::Result<T>;
