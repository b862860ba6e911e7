//! Test utilities and shared configuration.
//!
//! Common helpers for unit and integration tests.

#[cfg(any(test, feature = "testing"))]
use crate::config::{Config, LogFormat, SessionSettings};
#[cfg(any(test, feature = "testing"))]
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

/// Creates a configuration for testing purposes.
///
/// Binds an ephemeral port on localhost, signs cookies with a fixed secret
/// and uses the default session settings.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn create_test_config() -> Arc<Config> {
    Arc::new(Config {
        listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
        session_secret: "0000000000000000000000000000000000000000000000000000000000000000"
            .to_string(),
        session: SessionSettings::default(),
        concurrency_limit: 64,
        log_format: LogFormat::Pretty,
    })
}
