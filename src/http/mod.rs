//! HTTP surface - the public badge endpoints.
//!
//! - `GET /badge-data/:partner_id?format=json|js&theme=light|dark`
//! - `GET /badge-page/:partner_id?theme=light|dark`
//! - `GET /healthz`
//!
//! All handlers are independent read-only requests over the shared connection pool.

/// Request handlers
pub mod handlers;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Cache policy of the JSON and script forms.
pub const BADGE_DATA_CACHE_CONTROL: &str = "no-cache, must-revalidate";
/// Cache policy of the iframe page; embeds must never show stale state.
pub const BADGE_PAGE_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub database: DatabaseConnection,
    /// Immutable application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new `AppState` from a connection and configuration.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { database, config }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/badge-data/:partner_id", get(handlers::badge_data_handler))
        .route("/badge-page/:partner_id", get(handlers::badge_page_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the router until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Badge HTTP server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Badge HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Adds the public-verification headers shared by the JSON and script forms.
pub(crate) fn with_badge_data_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(BADGE_DATA_CACHE_CONTROL),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Adds the no-store headers of the iframe page.
pub(crate) fn with_badge_page_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(BADGE_PAGE_CACHE_CONTROL),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

impl Error {
    /// Returns the HTTP status code for this error.
    ///
    /// - `PartnerNotFound`: 404 Not Found
    /// - everything else: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::PartnerNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            // No badge payload for unknown partners.
            return with_badge_data_headers(status.into_response());
        }

        // Internal details stay in the log.
        error!("Badge request failed: {}", self);
        (status, "Internal server error").into_response()
    }
}
