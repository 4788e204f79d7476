//! Per-email rate limiter: a locked JSON file keyed by lowercase email,
//! values a date→timestamps map, pruned to the last 7 days on every write.
//!
//! Grounded in `webhook/app.py`'s file-locking pattern. Per spec.md §9's
//! source-cleanup note, the original's day-subtraction for pruning broke
//! on day-of-month ≤ 7 (it built a cutoff by subtracting from the calendar
//! day component instead of the timestamp); this implementation prunes by
//! comparing full `DateTime<Utc>` values against `now - Duration::days(7)`,
//! which has no such edge case.

use std::collections::{BTreeMap, HashMap};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

const PRUNE_WINDOW_DAYS: i64 = 7;
const RATE_WINDOW_HOURS: i64 = 24;

type EmailBuckets = BTreeMap<NaiveDate, Vec<DateTime<Utc>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { submissions_today: u32 },
    Rejected,
}

pub struct RateLimitStore {
    path: PathBuf,
}

impl RateLimitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checks `email`'s submission count in the trailing 24h window against
    /// `limit_per_day` and, if under the limit, records this submission.
    /// Check-and-record happens under one exclusive lock so concurrent
    /// submissions for the same email cannot both slip past the limit.
    pub fn check_and_record(&self, email: &str, limit_per_day: u32, now: DateTime<Utc>) -> std::io::Result<RateLimitDecision> {
        let key = email.to_lowercase();
        let mut file = self.open()?;
        file.lock_exclusive()?;
        let mut store = read_store(&file)?;

        let entry = store.entry(key).or_default();
        prune(entry, now);

        let window_start = now - Duration::hours(RATE_WINDOW_HOURS);
        let count_in_window = entry.values().flatten().filter(|ts| **ts > window_start).count() as u32;

        let decision = if count_in_window >= limit_per_day {
            RateLimitDecision::Rejected
        } else {
            entry.entry(now.date_naive()).or_default().push(now);
            RateLimitDecision::Allowed { submissions_today: count_in_window + 1 }
        };

        write_store(&mut file, &store)?;
        FileExt::unlock(&file)?;
        Ok(decision)
    }

    fn open(&self) -> std::io::Result<File> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        OpenOptions::new().read(true).write(true).create(true).open(&self.path)
    }
}

fn prune(entry: &mut EmailBuckets, now: DateTime<Utc>) {
    let cutoff = now - Duration::days(PRUNE_WINDOW_DAYS);
    for timestamps in entry.values_mut() {
        timestamps.retain(|ts| *ts > cutoff);
    }
    entry.retain(|_, timestamps| !timestamps.is_empty());
}

fn read_store(file: &File) -> std::io::Result<HashMap<String, EmailBuckets>> {
    let mut file = file;
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(HashMap::new());
    }
    Ok(serde_json::from_str(&contents).unwrap_or_default())
}

fn write_store(file: &mut File, store: &HashMap<String, EmailBuckets>) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(store)?;
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        chrono::TimeZone::with_ymd_and_hms(&Utc, y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn fifth_submission_succeeds_sixth_is_rejected() {
        let dir = tempdir().unwrap();
        let store = RateLimitStore::new(dir.path().join("rate_limit.json"));
        let base = at(2026, 3, 10, 8);
        for i in 0..5 {
            let decision = store.check_and_record("Jane@Example.com", 5, base + Duration::minutes(i)).unwrap();
            assert!(matches!(decision, RateLimitDecision::Allowed { .. }), "submission {i} should be allowed");
        }
        let sixth = store.check_and_record("jane@example.com", 5, base + Duration::minutes(6)).unwrap();
        assert_eq!(sixth, RateLimitDecision::Rejected);
    }

    #[test]
    fn submissions_26_hours_apart_are_independent() {
        let dir = tempdir().unwrap();
        let store = RateLimitStore::new(dir.path().join("rate_limit.json"));
        let first_batch = at(2026, 3, 10, 8);
        for i in 0..5 {
            store.check_and_record("user@example.com", 5, first_batch + Duration::minutes(i)).unwrap();
        }
        let later = first_batch + Duration::hours(26);
        let decision = store.check_and_record("user@example.com", 5, later).unwrap();
        assert!(matches!(decision, RateLimitDecision::Allowed { .. }));
    }

    #[test]
    fn pruning_works_across_a_day_of_month_boundary_at_or_below_seven() {
        // Regression for the historical day-of-month <= 7 pruning bug: use
        // a `now` whose day-of-month is within that range.
        let dir = tempdir().unwrap();
        let store = RateLimitStore::new(dir.path().join("rate_limit.json"));
        let old = at(2026, 3, 1, 8);
        store.check_and_record("user@example.com", 5, old).unwrap();

        let now = at(2026, 3, 9, 8);
        let decision = store.check_and_record("user@example.com", 5, now).unwrap();
        assert_eq!(decision, RateLimitDecision::Allowed { submissions_today: 1 });
    }

    #[test]
    fn email_is_matched_case_insensitively() {
        let dir = tempdir().unwrap();
        let store = RateLimitStore::new(dir.path().join("rate_limit.json"));
        let now = at(2026, 3, 10, 8);
        store.check_and_record("User@Example.com", 5, now).unwrap();
        for i in 1..5 {
            store.check_and_record("user@example.com", 5, now + Duration::minutes(i)).unwrap();
        }
        let decision = store.check_and_record("USER@EXAMPLE.COM", 5, now + Duration::minutes(6)).unwrap();
        assert_eq!(decision, RateLimitDecision::Rejected);
    }
}
