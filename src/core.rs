//! Core system components.
//!
//! Contains the request pipeline, its middleware, the router and the HTTP
//! server that drives them.

pub mod middleware;
pub mod pipeline;
pub mod response;
pub mod router;
pub mod server;
