//! Request pipeline.
//!
//! An explicitly ordered chain of middleware stages followed by a terminal
//! responder. Stages run synchronously and in registration order; any stage
//! may end the chain early by producing a response.

use crate::config::Result;
use crate::core::middleware::{RequestCounter, SessionLogger};
use crate::core::response::HttpResponse;
use crate::core::router::Router;
use crate::session::Session;
use hyper::Method;
use tracing::trace;

/// Context for a single request.
#[derive(Debug)]
pub struct RequestCtx {
    pub method: Method,
    pub path: String,
    pub session: Session,
}

/// Outcome of a middleware stage.
#[derive(Debug)]
pub enum Flow {
    /// Hand the request to the next stage.
    Continue,
    /// Stop the chain and send this response.
    Respond(HttpResponse),
}

pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle(&self, ctx: &mut RequestCtx) -> Flow;
}

/// Terminal stage producing the response when no middleware short-circuits.
pub trait Responder: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the response cannot be built.
    fn respond(&self, ctx: &RequestCtx) -> Result<HttpResponse>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Middleware>>,
    responder: Box<dyn Responder>,
}

impl Pipeline {
    /// Creates a pipeline with no middleware in front of `responder`.
    #[must_use]
    pub fn new(responder: impl Responder + 'static) -> Self {
        Self {
            stages: Vec::new(),
            responder: Box::new(responder),
        }
    }

    /// Appends a stage after the ones already registered.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Session logger, then request counter, then the router.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Router)
            .with_stage(SessionLogger)
            .with_stage(RequestCounter::default())
    }

    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage in order, then the responder.
    ///
    /// # Errors
    ///
    /// Returns an error if the responder fails to build its response.
    pub fn run(&self, ctx: &mut RequestCtx) -> Result<HttpResponse> {
        for stage in &self.stages {
            trace!(stage = stage.name(), "Running middleware");
            if let Flow::Respond(response) = stage.handle(ctx) {
                trace!(stage = stage.name(), "Middleware short-circuited");
                return Ok(response);
            }
        }
        self.responder.respond(ctx)
    }
}
