//! Error types and result aliases.
//!
//! Defines the core `AppError` enumeration and common `Result` type.

use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Session store failure.
    #[error("session store error: {0}")]
    Store(String),

    /// Socket I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP response construction error.
    #[error("http error: {0}")]
    Http(#[from] hyper::http::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
