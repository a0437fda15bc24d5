//! HTTP API application wiring (Axum router + handler state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use sitegate_auth::{WebhookConfig, WebhookHandler};

use crate::middleware;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: WebhookConfig) -> Router {
    let handler = Arc::new(WebhookHandler::new(config));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(handler)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
