//! Axum request handlers: signature verification, payload parsing, and
//! response shaping around [`crate::dispatch::Dispatcher`]. Mirrors the
//! teacher's `goals_routes`/`health_check` handler style (plain async
//! functions over a cloned `State`, `Json<Value>` for ad-hoc response
//! bodies).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use planforge_core::collaborators::{MinimalGuideRenderer, NoopNotifier, Notifier};
use planforge_core::PipelineConfig;

use crate::config::{Config, Environment, Secrets};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::WebhookError;
use crate::idempotency::IdempotencyStore;
use crate::order_log::OrderLog;
use crate::payload::WebhookPayload;
use crate::rate_limit::RateLimitStore;
use crate::signature;

const SIGNATURE_HEADER: &str = "x-planforge-signature";
const CRON_SECRET_HEADER: &str = "x-planforge-cron-secret";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub secrets: Arc<Secrets>,
    pub pipeline_config: Arc<PipelineConfig>,
    pub idempotency: Arc<IdempotencyStore>,
    pub rate_limit: Arc<RateLimitStore>,
    pub order_log: Arc<OrderLog>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, secrets: Secrets) -> Self {
        let pipeline_config = PipelineConfig {
            athletes_root: config.athletes_root.clone(),
            ..PipelineConfig::default()
        };
        let idempotency = IdempotencyStore::new(config.idempotency_store_path());
        let rate_limit = RateLimitStore::new(config.rate_limit_store_path());
        let order_log = OrderLog::new(config.order_log_path());
        Self {
            config: Arc::new(config),
            secrets: Arc::new(secrets),
            pipeline_config: Arc::new(pipeline_config),
            idempotency: Arc::new(idempotency),
            rate_limit: Arc::new(rate_limit),
            order_log: Arc::new(order_log),
            notifier: Arc::new(NoopNotifier),
        }
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "planforge-webhook",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Primary purchase-event endpoint. Verifies the HMAC signature (when a
/// shared secret is configured), parses the payload, and hands it to the
/// dispatcher.
pub async fn handle_purchase_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookError> {
    verify_signature(&state, &headers, &body)?;

    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    let guide_renderer = MinimalGuideRenderer;
    let dispatcher = Dispatcher {
        pipeline_config: (*state.pipeline_config).clone(),
        guide_renderer: &guide_renderer,
        notifier: state.notifier.as_ref(),
        idempotency: &state.idempotency,
        rate_limit: &state.rate_limit,
        order_log: &state.order_log,
        rate_limit_per_day: state.config.rate_limit_per_day,
    };

    let outcome = dispatcher.handle(&payload).await.map_err(map_dispatch_error)?;
    Ok(response_for(outcome))
}

/// Dev-only smoke-test route, gated on non-production environment. Accepts
/// an unsigned payload so local integration tests don't need to compute an
/// HMAC.
pub async fn handle_test_webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<impl IntoResponse, WebhookError> {
    if state.secrets.environment == Environment::Production {
        return Err(WebhookError::InvalidSignature);
    }

    let guide_renderer = MinimalGuideRenderer;
    let dispatcher = Dispatcher {
        pipeline_config: (*state.pipeline_config).clone(),
        guide_renderer: &guide_renderer,
        notifier: state.notifier.as_ref(),
        idempotency: &state.idempotency,
        rate_limit: &state.rate_limit,
        order_log: &state.order_log,
        rate_limit_per_day: state.config.rate_limit_per_day,
    };

    let outcome = dispatcher.handle(&payload).await.map_err(map_dispatch_error)?;
    Ok(response_for(outcome))
}

/// Cron-triggered abandoned-cart sweep. Requires `x-planforge-cron-secret`
/// to match the configured cron secret; the sweep itself is driven by the
/// same `Dispatcher::handle` path on a `checkout.session.expired` payload,
/// so this endpoint exists only to gate *who* may trigger it, not to add
/// new recovery logic.
pub async fn handle_recovery_sweep(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Result<impl IntoResponse, WebhookError> {
    let provided = headers
        .get(CRON_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if state.secrets.cron_shared_secret.as_deref() != Some(provided) || provided.is_empty() {
        return Err(WebhookError::InvalidSignature);
    }

    let guide_renderer = MinimalGuideRenderer;
    let dispatcher = Dispatcher {
        pipeline_config: (*state.pipeline_config).clone(),
        guide_renderer: &guide_renderer,
        notifier: state.notifier.as_ref(),
        idempotency: &state.idempotency,
        rate_limit: &state.rate_limit,
        order_log: &state.order_log,
        rate_limit_per_day: state.config.rate_limit_per_day,
    };

    let outcome = dispatcher.handle(&payload).await.map_err(map_dispatch_error)?;
    Ok(response_for(outcome))
}

fn verify_signature(state: &AppState, headers: &HeaderMap, body: &Bytes) -> Result<(), WebhookError> {
    let Some(secret) = state.secrets.hmac_shared_secret.as_deref() else {
        if state.secrets.environment == Environment::Production {
            return Err(WebhookError::InvalidSignature);
        }
        return Ok(());
    };

    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::InvalidSignature)?;

    if signature::verify(secret, body, provided) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

fn map_dispatch_error(err: crate::dispatch::DispatchError) -> WebhookError {
    use crate::dispatch::DispatchError as D;
    match err {
        D::Malformed(msg) => WebhookError::MalformedPayload(msg),
        D::RateLimited => WebhookError::RateLimited,
        D::Pipeline(e) => WebhookError::Pipeline(e),
        D::Io(e) => WebhookError::Store(e),
    }
}

fn response_for(outcome: DispatchOutcome) -> (StatusCode, Json<Value>) {
    match outcome {
        DispatchOutcome::Success { athlete_id } => {
            (StatusCode::OK, Json(json!({"status": "success", "athlete_id": athlete_id})))
        }
        DispatchOutcome::Duplicate => (StatusCode::OK, Json(json!({"status": "duplicate"}))),
        DispatchOutcome::Ignored => (StatusCode::OK, Json(json!({"status": "ignored"}))),
        DispatchOutcome::RecoverySent => (StatusCode::OK, Json(json!({"status": "recovery_sent"}))),
    }
}
