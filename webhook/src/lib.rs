//! `planforge-webhook` — purchase-event intake for the training package
//! pipeline: signature verification, idempotent dispatch, per-email rate
//! limiting, and abandoned-cart recovery, fronted by a small `axum` service.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod idempotency;
pub mod order_log;
pub mod payload;
pub mod rate_limit;
pub mod routes;
pub mod signature;

pub use config::{Config, Secrets};
pub use error::WebhookError;
pub use handlers::AppState;
pub use routes::create_routes;
