//! Append-only JSONL order log, grounded in `test_webhook.py`'s
//! `TestLogProductEvent` (one JSON object per line, under a shared lock so
//! concurrent webhook handlers never interleave partial lines) and
//! `TestEmailMasking` (PII-masked email field).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::Serialize;

use crate::dispatch::ProductEventOutcome;
use planforge_core::model::order::ProductType;

/// Masks an email for logging: first char of the local part, `***@`, first
/// char of the domain, `***.`, then the TLD — e.g. `jane@example.com` →
/// `j***@e***.com`. Anything that isn't `local@domain.tld`-shaped masks to
/// `"***"` rather than guessing.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "***".to_string();
    };
    if local.is_empty() || domain.is_empty() {
        return "***".to_string();
    }
    let Some((domain_head, tld)) = domain.rsplit_once('.') else {
        return "***".to_string();
    };
    let Some(domain_first) = domain_head.chars().next() else {
        return "***".to_string();
    };
    let local_first = local.chars().next().unwrap();
    format!("{local_first}***@{domain_first}***.{tld}")
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event_id: String,
    pub product_type: ProductType,
    pub masked_email: String,
    pub outcome: ProductEventOutcome,
    pub detail: Option<String>,
}

pub struct OrderLog {
    path: PathBuf,
}

impl OrderLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, entry: &OrderLogEntry) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.lock_exclusive()?;
        let line = serde_json::to_string(entry)?;
        writeln!(file, "{line}")?;
        file.sync_all()?;
        FileExt::unlock(&file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_standard_email() {
        assert_eq!(mask_email("user@example.com"), "u***@e***.com");
    }

    #[test]
    fn masks_single_char_local_part() {
        assert_eq!(mask_email("u@example.com"), "u***@e***.com");
    }

    #[test]
    fn masks_empty_or_invalid_as_stars() {
        assert_eq!(mask_email(""), "***");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn preserves_multi_part_tld() {
        let masked = mask_email("test@company.co.uk");
        assert!(masked.ends_with(".uk"));
    }

    #[test]
    fn append_writes_one_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = OrderLog::new(dir.path().join("order_log.jsonl"));
        log.append(&OrderLogEntry {
            timestamp: Utc::now(),
            event_id: "evt_1".into(),
            product_type: ProductType::TrainingPlan,
            masked_email: mask_email("jane@example.com"),
            outcome: ProductEventOutcome::PipelineSucceeded,
            detail: None,
        })
        .unwrap();

        let contents = std::fs::read_to_string(dir.path().join("order_log.jsonl")).unwrap();
        assert_eq!(contents.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["event_id"], "evt_1");
        assert_eq!(parsed["masked_email"], "j***@e***.com");
    }
}
