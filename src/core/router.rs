//! Route table.
//!
//! The terminal responder: `GET /` answers with a fixed greeting, anything
//! else is a 404.

use crate::config::Result;
use crate::core::pipeline::{RequestCtx, Responder};
use crate::core::response::{HttpResponse, text_response};
use hyper::{Method, StatusCode};

pub const GREETING: &str = "Hello";

#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Responder for Router {
    fn respond(&self, ctx: &RequestCtx) -> Result<HttpResponse> {
        match (&ctx.method, ctx.path.as_str()) {
            (&Method::GET | &Method::HEAD, "/") => text_response(StatusCode::OK, GREETING),
            (method, path) => {
                text_response(StatusCode::NOT_FOUND, format!("Cannot {method} {path}"))
            }
        }
    }
}
