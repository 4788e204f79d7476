//! Webhook-crate error surface. Follows `src/auth/errors.rs`'s shape: one
//! `thiserror` enum, `#[from]` conversions where a lower-level error
//! naturally composes, and an `IntoResponse` impl matching spec.md §6's
//! status-code table via the same `(StatusCode, &str)` tuple-match idiom.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("signature verification failed")]
    InvalidSignature,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("payment platform upstream error: {0}")]
    Upstream(String),

    #[error("pipeline run failed: {0}")]
    Pipeline(#[from] planforge_core::PipelineError),

    #[error("store io error: {0}")]
    Store(#[from] std::io::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            WebhookError::InvalidSignature => (StatusCode::UNAUTHORIZED, "invalid signature"),
            WebhookError::MalformedPayload(_) => (StatusCode::BAD_REQUEST, "malformed payload"),
            WebhookError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded"),
            WebhookError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream error"),
            WebhookError::Pipeline(_) => (StatusCode::SERVICE_UNAVAILABLE, "pipeline failed"),
            WebhookError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "store unavailable"),
        };

        let body = Json(json!({
            "status": "error",
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
