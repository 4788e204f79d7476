//! Order-type dispatcher: the webhook's core decision logic, kept free of
//! axum so it is directly unit-testable. Grounded in
//! `test_webhook.py::TestWooCommerceWebhook`/`TestStripeWebhook` (order-type
//! routing), `TestIdempotencyTiming` (mark-before-pipeline ordering),
//! `TestCheckoutRecovery` (abandoned-cart gating), and `TestCoachingWebhook`/
//! `TestConsultingWebhook` (log-only product types).

use chrono::Utc;
use serde::Serialize;

use planforge_core::collaborators::{GuideRenderer, Notifier};
use planforge_core::model::order::ProductType;
use planforge_core::{PipelineConfig, PipelineRunner};

use crate::idempotency::IdempotencyStore;
use crate::order_log::{mask_email, OrderLog, OrderLogEntry};
use crate::payload::WebhookPayload;
use crate::rate_limit::{RateLimitDecision, RateLimitStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductEventOutcome {
    PipelineSucceeded,
    PipelineFailed,
    SubscriptionLogged,
    ConsultingLogged,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Success { athlete_id: String },
    Duplicate,
    Ignored,
    RecoverySent,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error(transparent)]
    Pipeline(#[from] planforge_core::PipelineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct Dispatcher<'a> {
    pub pipeline_config: PipelineConfig,
    pub guide_renderer: &'a dyn GuideRenderer,
    pub notifier: &'a dyn Notifier,
    pub idempotency: &'a IdempotencyStore,
    pub rate_limit: &'a RateLimitStore,
    pub order_log: &'a OrderLog,
    pub rate_limit_per_day: u32,
}

impl<'a> Dispatcher<'a> {
    /// Handles one webhook payload end to end: idempotency gate, rate-limit
    /// gate, order-type routing, and (for `training_plan` orders) the full
    /// pipeline run. `checkout.session.expired` events route to the
    /// abandoned-cart path instead and never touch the idempotency store
    /// (the cart may legitimately be retried after an earlier expiry).
    pub async fn handle(&self, payload: &WebhookPayload) -> Result<DispatchOutcome, DispatchError> {
        match payload.event_type.as_str() {
            "checkout.session.completed" => self.handle_completed_checkout(payload).await,
            "checkout.session.expired" => Ok(self.handle_abandoned_cart(payload).await),
            _ => Ok(DispatchOutcome::Ignored),
        }
    }

    async fn handle_completed_checkout(&self, payload: &WebhookPayload) -> Result<DispatchOutcome, DispatchError> {
        let customer = payload
            .customer_details
            .as_ref()
            .ok_or_else(|| DispatchError::Malformed("missing customer_details".to_string()))?;

        let product_type = parse_product_type(payload.metadata.product_type.as_deref())?;
        let athlete_id = athlete_id_for(payload, customer.name.as_deref());

        // Check-and-mark under one exclusive lock: two concurrent deliveries
        // of the same event-id can't both observe "not yet processed" before
        // either marks it, closing the TOCTOU a split check/mark leaves open.
        if !self.idempotency.check_and_mark(&payload.id, &athlete_id)? {
            return Ok(DispatchOutcome::Duplicate);
        }

        let decision = self
            .rate_limit
            .check_and_record(&customer.email, self.rate_limit_per_day, Utc::now())?;
        if matches!(decision, RateLimitDecision::Rejected) {
            return Err(DispatchError::RateLimited);
        }

        let outcome = match product_type {
            ProductType::TrainingPlan => self.run_training_plan(&athlete_id).await,
            ProductType::Coaching => Ok(ProductEventOutcome::SubscriptionLogged),
            ProductType::Consulting => Ok(ProductEventOutcome::ConsultingLogged),
        };

        let (result_label, detail) = match &outcome {
            Ok(ProductEventOutcome::PipelineSucceeded) => ("success", None),
            Ok(ProductEventOutcome::PipelineFailed) => ("pipeline_failed", None),
            Ok(ProductEventOutcome::SubscriptionLogged) => ("subscription_logged", None),
            Ok(ProductEventOutcome::ConsultingLogged) => ("consulting_logged", None),
            Err(e) => ("error", Some(e.to_string())),
        };
        self.idempotency.record_result(&payload.id, result_label)?;

        self.order_log.append(&OrderLogEntry {
            timestamp: Utc::now(),
            event_id: payload.id.clone(),
            product_type,
            masked_email: mask_email(&customer.email),
            outcome: outcome.clone().unwrap_or(ProductEventOutcome::PipelineFailed),
            detail,
        })?;

        outcome?;
        Ok(DispatchOutcome::Success { athlete_id })
    }

    async fn run_training_plan(&self, athlete_id: &str) -> Result<ProductEventOutcome, DispatchError> {
        let runner = PipelineRunner::new(self.pipeline_config.clone(), self.guide_renderer);
        match runner.run(athlete_id) {
            Ok(report) => {
                let _ = self
                    .notifier
                    .send_package_ready(&load_profile_for_notification(&self.pipeline_config, athlete_id))
                    .await;
                let _ = report;
                Ok(ProductEventOutcome::PipelineSucceeded)
            }
            Err(e) => {
                tracing::warn!(athlete_id, error = %e, "pipeline run failed for webhook-triggered order");
                Err(DispatchError::Pipeline(e))
            }
        }
    }

    /// Sends an abandoned-cart recovery email only when promotional consent
    /// was given AND a recovery URL is present; missing either is a silent
    /// no-op (`Ignored`), matching `TestCheckoutRecovery`'s gating tests.
    async fn handle_abandoned_cart(&self, payload: &WebhookPayload) -> DispatchOutcome {
        let Some(customer) = payload.customer_details.as_ref() else {
            return DispatchOutcome::Ignored;
        };
        if !payload.consent.opted_in_to_promotions() {
            return DispatchOutcome::Ignored;
        }
        let Some(recovery_url) = payload.after_expiration.recovery_url() else {
            return DispatchOutcome::Ignored;
        };

        match self.notifier.send_recovery_email(&customer.email, recovery_url).await {
            Ok(()) => DispatchOutcome::RecoverySent,
            Err(e) => {
                tracing::warn!(error = %e, "recovery email send failed");
                DispatchOutcome::Ignored
            }
        }
    }
}

fn parse_product_type(raw: Option<&str>) -> Result<ProductType, DispatchError> {
    match raw {
        Some("training_plan") | None => Ok(ProductType::TrainingPlan),
        Some("coaching") => Ok(ProductType::Coaching),
        Some("consulting") => Ok(ProductType::Consulting),
        Some(other) => Err(DispatchError::Malformed(format!("unknown product_type '{other}'"))),
    }
}

fn athlete_id_for(payload: &WebhookPayload, customer_name: Option<&str>) -> String {
    if let Some(intake_id) = &payload.metadata.intake_id {
        return slugify(intake_id);
    }
    if let Some(name) = payload.metadata.athlete_name.as_deref().or(customer_name) {
        return slugify(name);
    }
    slugify(&payload.id)
}

/// Lowercases and replaces anything outside `[a-z0-9-_]` with `_`, matching
/// the athlete-id slug invariant enforced by `Profile` validation.
fn slugify(input: &str) -> String {
    let mut slug: String = input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    slug.truncate(64);
    if slug.is_empty() {
        slug = "athlete".to_string();
    }
    slug
}

fn load_profile_for_notification(config: &PipelineConfig, athlete_id: &str) -> planforge_core::model::profile::Profile {
    let path = config.athlete_dir(athlete_id).join("profile.yaml");
    planforge_core::model::load_document(&path, "notify").unwrap_or_else(|_| placeholder_profile(athlete_id))
}

fn placeholder_profile(athlete_id: &str) -> planforge_core::model::profile::Profile {
    use planforge_core::model::profile::*;
    Profile {
        athlete_id: athlete_id.to_string(),
        display_name: athlete_id.to_string(),
        email: String::new(),
        age_years: None,
        date_of_birth: None,
        body_mass_kg: 70.0,
        ftp_watts: 200,
        race_target: RaceTarget { name: String::new(), race_id: None, date: Utc::now().date_naive() },
        b_events: vec![],
        weekly_pattern: Default::default(),
        schedule_constraints: ScheduleConstraints::default(),
        training_history: TrainingHistory {
            years_structured: 0.0,
            highest_ever_weekly_hours: 0.0,
            current_weekly_hours: 0.0,
            strength_training_background: false,
        },
        recent_training_state: RecentTrainingState {
            current_phase: TrainingPhaseState::Unknown,
            days_since_last_ride: 0,
            coming_off_injury: false,
        },
        health_factors: HealthFactors::default(),
        injuries: vec![],
        movement_limitations: vec![],
        equipment: vec![],
        methodology_preferences: MethodologyPreferences::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_product_type_is_malformed() {
        assert!(matches!(parse_product_type(Some("subscription_box")), Err(DispatchError::Malformed(_))));
    }

    #[test]
    fn missing_product_type_defaults_to_training_plan() {
        assert!(matches!(parse_product_type(None), Ok(ProductType::TrainingPlan)));
    }

    #[test]
    fn slugify_produces_a_valid_athlete_id_slug() {
        let slug = slugify("Jane O'Doe!!!");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
    }

    #[test]
    fn slugify_never_produces_empty_string() {
        assert_eq!(slugify(""), "athlete");
        assert_eq!(slugify("   "), "athlete");
    }
}
