use axum::{Router, routing::post};

pub mod system;
pub mod webhook;

/// Router for the identity-provider webhook endpoints.
pub fn router() -> Router {
    Router::new().route("/webhook/identity", post(webhook::identity))
}
