//! Per-session request counter.
//!
//! Counts how many requests each session has made. An absent field means
//! zero; a stored zero is a real value and increments to one.

use crate::core::pipeline::{Flow, Middleware, RequestCtx};
use crate::session::Session;
use serde_json::Value;
use tracing::{info, warn};

pub const COUNTER_FIELD: &str = "counter";

#[derive(Debug, Clone)]
pub struct RequestCounter {
    field: String,
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new(COUNTER_FIELD)
    }
}

impl RequestCounter {
    #[must_use]
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Reads the current count, treating an absent or non-integer field as zero.
    #[must_use]
    pub fn current(&self, session: &Session) -> u64 {
        match session.get_value(&self.field) {
            None => 0,
            Some(value) => value.as_u64().unwrap_or_else(|| {
                warn!(
                    field = %self.field,
                    value = %value,
                    "Counter field is not a non-negative integer, restarting count"
                );
                0
            }),
        }
    }

    /// Increments the count stored in `session` and returns the new value.
    pub fn increment(&self, session: &mut Session) -> u64 {
        let next = self.current(session).saturating_add(1);
        session.insert_value(&self.field, Value::from(next));
        next
    }
}

impl Middleware for RequestCounter {
    fn name(&self) -> &'static str {
        "request_counter"
    }

    fn handle(&self, ctx: &mut RequestCtx) -> Flow {
        let counter = self.increment(&mut ctx.session);
        info!(counter, "counter");
        Flow::Continue
    }
}
