use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sitegate_auth::WebhookError;

pub fn webhook_error_to_response(err: WebhookError) -> axum::response::Response {
    match err {
        WebhookError::InvalidSignature => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_signature",
            "webhook signature missing or invalid",
        ),
        WebhookError::MalformedPayload(msg) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_payload", msg)
        }
        WebhookError::Unauthorized => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "user is not authorized for this site",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_error_to_its_status() {
        assert_eq!(
            webhook_error_to_response(WebhookError::InvalidSignature).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            webhook_error_to_response(WebhookError::MalformedPayload("eof".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            webhook_error_to_response(WebhookError::Unauthorized).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
