//! Wire shapes for the purchase-event webhook, matching spec.md §6's
//! flattened `{id, customer_details, metadata}` contract plus the
//! `type`/`consent`/`after_expiration` fields the original test suite
//! (`test_webhook.py::TestCheckoutRecovery`) exercises for the
//! abandoned-cart path. `metadata.weeks` accepts either a JSON number or a
//! numeric string, matching the original's loosely-typed intake.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetadataPayload {
    pub product_type: Option<String>,
    pub tier: Option<String>,
    pub intake_id: Option<String>,
    #[serde(default)]
    pub weeks: Option<serde_json::Value>,
    pub price_cents: Option<u32>,
    pub athlete_name: Option<String>,
}

impl MetadataPayload {
    pub fn weeks_as_u32(&self) -> Option<u32> {
        match self.weeks.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().map(|v| v as u32),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Consent {
    pub promotions: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecoveryInfo {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AfterExpiration {
    pub recovery: Option<RecoveryInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub id: String,
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub metadata: MetadataPayload,
    #[serde(default)]
    pub consent: Consent,
    #[serde(default)]
    pub after_expiration: AfterExpiration,
}

impl Consent {
    pub fn opted_in_to_promotions(&self) -> bool {
        self.promotions.as_deref() == Some("opt_in")
    }
}

impl AfterExpiration {
    pub fn recovery_url(&self) -> Option<&str> {
        self.recovery.as_ref()?.url.as_deref().filter(|u| !u.is_empty())
    }
}
