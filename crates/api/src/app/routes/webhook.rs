use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use sitegate_auth::{WebhookEvent, WebhookHandler, WebhookOutcome};

use crate::app::errors::webhook_error_to_response;

/// Header carrying the compact signed token.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// `POST /webhook/identity`
///
/// 200 with an empty body when the user already holds the role, 200 with the
/// metadata to persist when the role is granted, 400/401 otherwise.
pub async fn identity(
    Extension(handler): Extension<Arc<WebhookHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = WebhookEvent::new(extract_signature(&headers), &body);

    match handler.handle(&event) {
        Ok(WebhookOutcome::Allowed) => StatusCode::OK.into_response(),
        Ok(WebhookOutcome::Granted(update)) => (StatusCode::OK, Json(update)).into_response(),
        Err(err) => webhook_error_to_response(err),
    }
}

/// A header that is not valid ASCII is treated as absent.
fn extract_signature(headers: &HeaderMap) -> Option<&str> {
    headers.get(SIGNATURE_HEADER)?.to_str().ok()
}
