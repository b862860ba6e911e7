//! Configuration settings.
//!
//! Defines the main `Config` struct and environment variable loading logic.

use super::error::{AppError, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use std::convert::Infallible;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable text lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = Infallible;

    /// Parses a format name, falling back to `Pretty` for anything unknown.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "JSON" => Self::Json,
            _ => Self::Pretty,
        })
    }
}

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_bool_or(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        let v = v.to_lowercase();
        v == "true" || v == "1"
    })
}

fn get_env_usize_or(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn random_secret() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Session cookie and persistence behavior.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
    /// Whether the cookie gets the `Secure` attribute.
    pub cookie_secure: bool,
    /// Save sessions created during a request even if nothing was written to them.
    pub save_uninitialized: bool,
    /// Save existing sessions on every request even if unmodified.
    pub resave: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "sid".to_string(),
            cookie_secure: false,
            save_uninitialized: true,
            resave: false,
        }
    }
}

/// Application configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Secret used to sign session cookies.
    pub session_secret: String,
    /// Session cookie settings.
    pub session: SessionSettings,
    /// Maximum number of connections served at once.
    pub concurrency_limit: usize,
    /// Logging format.
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// When `SESSION_SECRET` is unset a random secret is generated, so cookies
    /// issued by one process are not accepted by the next.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `LISTEN_ADDR` is not a valid socket address
    /// or `CONCURRENCY_LIMIT` is zero.
    pub fn from_env() -> Result<Arc<Self>> {
        let raw_addr = get_env_or("LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr = raw_addr.parse().map_err(|e| {
            AppError::Config(format!("LISTEN_ADDR '{raw_addr}' is not a socket address: {e}"))
        })?;

        let session_secret = match env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("SESSION_SECRET not set, using a random per-process secret");
                random_secret()
            }
        };

        let defaults = SessionSettings::default();
        let session = SessionSettings {
            cookie_name: get_env_or("SESSION_COOKIE_NAME", &defaults.cookie_name),
            cookie_secure: get_env_bool_or("SESSION_COOKIE_SECURE", defaults.cookie_secure),
            save_uninitialized: get_env_bool_or(
                "SESSION_SAVE_UNINITIALIZED",
                defaults.save_uninitialized,
            ),
            resave: get_env_bool_or("SESSION_RESAVE", defaults.resave),
        };

        let concurrency_limit = get_env_usize_or("CONCURRENCY_LIMIT", 1024);
        if concurrency_limit == 0 {
            return Err(AppError::Config(
                "CONCURRENCY_LIMIT must be greater than zero".to_string(),
            ));
        }

        Ok(Arc::new(Self {
            listen_addr,
            session_secret,
            session,
            concurrency_limit,
            log_format: get_env_or("LOG_FORMAT", "pretty")
                .parse()
                .unwrap_or(LogFormat::Pretty),
        }))
    }
}
