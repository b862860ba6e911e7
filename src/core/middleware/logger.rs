//! Session logging.

use crate::core::pipeline::{Flow, Middleware, RequestCtx};
use tracing::info;

/// Logs the full session bag of every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionLogger;

impl Middleware for SessionLogger {
    fn name(&self) -> &'static str {
        "session_logger"
    }

    fn handle(&self, ctx: &mut RequestCtx) -> Flow {
        info!(
            http_method = %ctx.method,
            http_path = %ctx.path,
            session = %ctx.session.snapshot(),
            "SESSION"
        );
        Flow::Continue
    }
}
