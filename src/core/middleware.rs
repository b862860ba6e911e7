//! Middleware components.
//!
//! Includes the session logger and the per-session request counter.

mod counter;
mod logger;

pub use counter::{COUNTER_FIELD, RequestCounter};
pub use logger::SessionLogger;
