//! Library definitions.
//!
//! Exports the configuration, session handling, request pipeline and HTTP
//! server of the session counter.

pub mod config;
pub mod core;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use crate::config::{AppError, Config, LogFormat, Result, SessionSettings};
pub use crate::core::middleware::{COUNTER_FIELD, RequestCounter, SessionLogger};
pub use crate::core::pipeline::{Flow, Middleware, Pipeline, RequestCtx, Responder};
pub use crate::core::router::Router;
pub use crate::core::server::{App, run, serve};
pub use crate::session::{
    CookieOptions, CredentialSigner, MemoryStore, Session, SessionData, SessionManager,
    SessionStore,
};
