//! Route wiring, mirroring the teacher's `create_routes`/`goals_routes`
//! shape: a plain function building a `Router` over a cloned `State`.

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::handlers::{handle_purchase_webhook, handle_recovery_sweep, handle_test_webhook, health_check, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/webhook/purchase", post(handle_purchase_webhook))
        .route("/webhook/test", post(handle_test_webhook))
        .route("/webhook/recovery-sweep", post(handle_recovery_sweep))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
