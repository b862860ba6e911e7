//! HTTP response utilities.
//!
//! Provides shared builders for the plain-text responses the server emits.

use crate::config::Result;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, HeaderValue, SET_COOKIE};
use hyper::{Response, StatusCode};

pub type HttpResponse = Response<Full<Bytes>>;

/// Builds a plain-text response.
///
/// # Errors
///
/// Returns an error if the response cannot be assembled.
pub fn text_response(status: StatusCode, body: impl Into<Bytes>) -> Result<HttpResponse> {
    let body = body.into();
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len().to_string())
        .body(Full::new(body))?;
    Ok(response)
}

/// Attaches a `Set-Cookie` header and marks the response uncacheable.
///
/// # Errors
///
/// Returns an error if `cookie` is not a valid header value.
pub fn with_set_cookie(mut response: HttpResponse, cookie: &str) -> Result<HttpResponse> {
    let value = HeaderValue::from_str(cookie).map_err(hyper::http::Error::from)?;
    let headers = response.headers_mut();
    headers.append(SET_COOKIE, value);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

/// Fallback `500` response, built without any fallible step.
#[must_use]
pub fn internal_error() -> HttpResponse {
    let mut response = Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
