//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Answer each request with a cached page, a static asset or the template
//! - Stop accepting on shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{Resolution, SiteState};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteState>,
    pub assets: ServeDir,
}

/// HTTP server for pre-rendered pages.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `site`.
    pub fn new(config: AppConfig, site: SiteState) -> Self {
        let assets = ServeDir::new(site.output_folder());
        let state = AppState {
            site: Arc::new(site),
            assets,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The configured router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Page handler.
/// Serves a cached page, delegates to static files, or falls back to the
/// template.
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_string();
    let resolution = state.site.resolve(&path);
    let outcome = resolution.outcome();

    tracing::debug!(
        request_id = %request_id(request.headers()),
        path = %path,
        outcome,
        "Serving request"
    );

    let response = match resolution {
        Resolution::Asset => match state.assets.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        Resolution::Rendered(entry) => {
            let html = state.site.template().compose(state.site.cache().global(), &entry.fragment);
            (StatusCode::OK, Html(html)).into_response()
        }
        Resolution::Fallback => (StatusCode::OK, Html(state.site.template().raw().to_string())).into_response(),
    };

    metrics::record_request(outcome, start_time);
    response
}
