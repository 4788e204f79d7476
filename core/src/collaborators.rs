//! Narrow interfaces to external collaborators this crate does not itself
//! implement: email delivery, HTML guide templating, PDF rendering. No
//! production network/process implementation ships here — only the trait
//! boundary and the minimal in-repo implementations needed to keep the
//! pipeline testable without a real collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::plan_dates::PlanDates;
use crate::model::profile::Profile;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),
}

/// Email delivery is an external collaborator (SMTP/third-party API); this
/// trait is the narrow seam the pipeline and webhook crate depend on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_package_ready(&self, profile: &Profile) -> Result<(), NotifyError>;
    async fn send_recovery_email(&self, email: &str, recovery_url: &str) -> Result<(), NotifyError>;
}

pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_package_ready(&self, _profile: &Profile) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn send_recovery_email(&self, _email: &str, _recovery_url: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// The HTML guide templating engine lives outside this crate; this trait is
/// the seam, with a minimal built-in renderer producing a single
/// self-contained document so the render-guide stage is testable without a
/// real template engine.
pub trait GuideRenderer: Send + Sync {
    fn render(&self, athlete_name: &str, plan_dates: &PlanDates) -> Result<String, RenderError>;
}

pub struct MinimalGuideRenderer;

impl GuideRenderer for MinimalGuideRenderer {
    fn render(&self, athlete_name: &str, plan_dates: &PlanDates) -> Result<String, RenderError> {
        let mut body = String::new();
        body.push_str(&format!(
            "<html><head><meta charset='utf-8'><title>{athlete_name} Training Plan</title></head><body>\n"
        ));
        body.push_str(&format!("<h1>{athlete_name}'s Training Plan</h1>\n"));
        for week in &plan_dates.weeks {
            body.push_str(&format!(
                "<h2>Week {} ({:?})</h2>\n<p>{} - {}</p>\n",
                week.week_number, week.phase, week.monday, week.sunday
            ));
        }
        body.push_str("</body></html>\n");
        Ok(body)
    }
}

/// Headless-browser PDF rendering lives outside this crate; only the trait
/// and its per-call timeout budget ship here.
pub const PDF_RENDER_TIMEOUT_SECONDS: u64 = 60;

pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}
