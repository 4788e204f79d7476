//! Order event — the webhook's normalized view of a purchase event, shared
//! with `planforge-webhook` so both crates agree on the wire shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    TrainingPlan,
    Coaching,
    Consulting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMetadata {
    pub product_type: ProductType,
    pub tier: Option<String>,
    pub intake_id: String,
    pub weeks: Option<u32>,
    pub price_cents: u32,
    pub athlete_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub event_id: String,
    pub customer: Customer,
    pub metadata: OrderMetadata,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    Accepted,
    MarkedProcessed,
    PipelineExecuted,
    NotificationSent,
}
