//! HTTP server.
//!
//! Accepts TCP connections, serves HTTP/1.1 through hyper and runs every
//! request through session attach, the middleware pipeline and session
//! commit.

use crate::config::{Config, Result};
use crate::core::pipeline::{Pipeline, RequestCtx};
use crate::core::response::{HttpResponse, internal_error, with_set_cookie};
use crate::session::{MemoryStore, SessionManager};
use hyper::Request;
use hyper::header::COOKIE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// Session handling and the request pipeline, shared by all connections.
pub struct App {
    sessions: SessionManager,
    pipeline: Pipeline,
}

impl App {
    #[must_use]
    pub const fn new(sessions: SessionManager, pipeline: Pipeline) -> Self {
        Self { sessions, pipeline }
    }

    /// Standard pipeline over an in-memory session store.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let sessions = SessionManager::from_config(config, Arc::new(MemoryStore::new()));
        Self::new(sessions, Pipeline::standard())
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Handles one request. Failures become a `500` response.
    pub async fn handle<B>(&self, req: Request<B>) -> HttpResponse {
        match self.try_handle(req).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Request failed");
                internal_error()
            }
        }
    }

    async fn try_handle<B>(&self, req: Request<B>) -> Result<HttpResponse> {
        let (parts, _) = req.into_parts();
        let cookie_header = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        let cookie_header = (!cookie_header.is_empty()).then_some(cookie_header);

        let session = self.sessions.attach(cookie_header.as_deref()).await?;
        let mut ctx = RequestCtx {
            method: parts.method,
            path: parts.uri.path().to_string(),
            session,
        };

        let response = self.pipeline.run(&mut ctx)?;

        match self.sessions.commit(&ctx.session).await? {
            Some(cookie) => with_set_cookie(response, &cookie),
            None => Ok(response),
        }
    }
}

/// Serves connections from `listener` until `shutdown` resolves.
///
/// At most `concurrency_limit` connections are handled at once.
///
/// # Errors
///
/// Currently always returns `Ok`; accept failures are logged and retried.
pub async fn serve<F>(
    listener: TcpListener,
    app: Arc<App>,
    concurrency_limit: usize,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let connection_limit = Arc::new(Semaphore::new(concurrency_limit));
    tokio::pin!(shutdown);

    loop {
        let permit = tokio::select! {
            () = &mut shutdown => break,
            permit = connection_limit.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let accepted = tokio::select! {
            () = &mut shutdown => break,
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, peer_addr)) => {
                let app = Arc::clone(&app);
                tokio::spawn(async move {
                    let _permit = permit;
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| {
                        let app = Arc::clone(&app);
                        async move { Ok::<_, Infallible>(app.handle(req).await) }
                    });

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        debug!(peer_addr = %peer_addr, error = %e, "Connection error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "Accept error");
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }

    info!("Server stopped accepting connections");
    Ok(())
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns `AppError::Io` if the listener cannot be bound.
pub async fn run(config: Arc<Config>) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    let local_addr = listener.local_addr()?;
    let app = Arc::new(App::from_config(&config));

    info!(
        listen_addr = %local_addr,
        cookie_name = %config.session.cookie_name,
        "Listening at http://{local_addr}"
    );

    serve(listener, app, config.concurrency_limit, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    })
    .await
}
