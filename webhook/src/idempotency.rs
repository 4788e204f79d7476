//! Idempotency store: a locked JSON file keyed by event-id, grounded in
//! `webhook/app.py`'s `fcntl`-based locking and
//! `test_webhook.py::TestIdempotencyTiming`'s mark-before-pipeline proof.
//!
//! The critical check-then-mark ordering (spec.md §4.8 steps 2-4) is
//! enforced by [`IdempotencyStore::check_and_mark`]: the read and the
//! conditional insert happen under one exclusive lock, so two concurrent
//! deliveries of the same event can't both observe "not yet processed"
//! before either marks it. `is_processed`/`mark_processed` remain as
//! separate calls only for callers (tests, `record_result` call sites) that
//! genuinely don't need the combined check.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdempotencyRecord {
    pub processed_at: DateTime<Utc>,
    pub athlete_id: String,
    pub pipeline_result: Option<String>,
}

pub struct IdempotencyStore {
    path: PathBuf,
}

impl IdempotencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `true` if `event_id` has already been marked processed.
    pub fn is_processed(&self, event_id: &str) -> std::io::Result<bool> {
        let file = self.open_for_read()?;
        file.lock_shared()?;
        let map = read_map(&file)?;
        FileExt::unlock(&file)?;
        Ok(map.contains_key(event_id))
    }

    /// Marks `event_id` processed under an exclusive lock. Idempotent: a
    /// second call for the same event-id overwrites the record rather than
    /// erroring. The dispatcher uses [`Self::check_and_mark`] instead to
    /// avoid the TOCTOU gap between a separate check and this call.
    pub fn mark_processed(&self, event_id: &str, athlete_id: &str) -> std::io::Result<()> {
        let mut file = self.open_for_write()?;
        file.lock_exclusive()?;
        let mut map = read_map(&file)?;
        map.insert(
            event_id.to_string(),
            IdempotencyRecord {
                processed_at: Utc::now(),
                athlete_id: athlete_id.to_string(),
                pipeline_result: None,
            },
        );
        write_map(&mut file, &map)?;
        FileExt::unlock(&file)?;
        Ok(())
    }

    /// Atomically checks whether `event_id` is already processed and, if
    /// not, marks it under the same exclusive lock. Returns `true` if this
    /// call is the one that newly marked the event (the caller should run
    /// the pipeline), `false` if it was already processed (the caller must
    /// not run it again).
    pub fn check_and_mark(&self, event_id: &str, athlete_id: &str) -> std::io::Result<bool> {
        let mut file = self.open_for_write()?;
        file.lock_exclusive()?;
        let mut map = read_map(&file)?;
        if map.contains_key(event_id) {
            FileExt::unlock(&file)?;
            return Ok(false);
        }
        map.insert(
            event_id.to_string(),
            IdempotencyRecord {
                processed_at: Utc::now(),
                athlete_id: athlete_id.to_string(),
                pipeline_result: None,
            },
        );
        write_map(&mut file, &map)?;
        FileExt::unlock(&file)?;
        Ok(true)
    }

    /// Records the pipeline's outcome against an already-marked event.
    /// Never unmarks on failure — replay is a manual operator action.
    pub fn record_result(&self, event_id: &str, result: &str) -> std::io::Result<()> {
        let mut file = self.open_for_write()?;
        file.lock_exclusive()?;
        let mut map = read_map(&file)?;
        if let Some(record) = map.get_mut(event_id) {
            record.pipeline_result = Some(result.to_string());
        }
        write_map(&mut file, &map)?;
        FileExt::unlock(&file)?;
        Ok(())
    }

    fn open_for_read(&self) -> std::io::Result<File> {
        ensure_parent(&self.path)?;
        OpenOptions::new().read(true).write(true).create(true).open(&self.path)
    }

    fn open_for_write(&self) -> std::io::Result<File> {
        self.open_for_read()
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn read_map(file: &File) -> std::io::Result<HashMap<String, IdempotencyRecord>> {
    let mut file = file;
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(&contents).or_else(|_| Ok(HashMap::new()))
}

fn write_map(file: &mut File, map: &HashMap<String, IdempotencyRecord>) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(map)?;
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unmarked_event_is_not_processed() {
        let dir = tempdir().unwrap();
        let store = IdempotencyStore::new(dir.path().join("idempotency.json"));
        assert!(!store.is_processed("evt_1").unwrap());
    }

    #[test]
    fn marked_event_is_processed_on_replay() {
        let dir = tempdir().unwrap();
        let store = IdempotencyStore::new(dir.path().join("idempotency.json"));
        store.mark_processed("evt_1", "jane-doe").unwrap();
        assert!(store.is_processed("evt_1").unwrap());
    }

    #[test]
    fn distinct_events_are_independent() {
        let dir = tempdir().unwrap();
        let store = IdempotencyStore::new(dir.path().join("idempotency.json"));
        store.mark_processed("evt_1", "jane-doe").unwrap();
        assert!(!store.is_processed("evt_2").unwrap());
    }

    #[test]
    fn check_and_mark_returns_true_once_then_false() {
        let dir = tempdir().unwrap();
        let store = IdempotencyStore::new(dir.path().join("idempotency.json"));
        assert!(store.check_and_mark("evt_1", "jane-doe").unwrap());
        assert!(!store.check_and_mark("evt_1", "jane-doe").unwrap());
        assert!(store.is_processed("evt_1").unwrap());
    }

    #[test]
    fn record_result_is_retained_after_mark() {
        let dir = tempdir().unwrap();
        let store = IdempotencyStore::new(dir.path().join("idempotency.json"));
        store.mark_processed("evt_1", "jane-doe").unwrap();
        store.record_result("evt_1", "success").unwrap();
        let file = File::open(dir.path().join("idempotency.json")).unwrap();
        let map = read_map(&file).unwrap();
        assert_eq!(map["evt_1"].pipeline_result.as_deref(), Some("success"));
    }
}
