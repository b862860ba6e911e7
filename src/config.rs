//! Configuration management.
//!
//! Loads configuration from environment variables using dotenvy.
//! All settings are loaded at startup and shared behind an Arc.

mod error;
mod settings;

pub use error::{AppError, Result};
pub use settings::{Config, LogFormat, SessionSettings};
