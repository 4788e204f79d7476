pub mod archetype;
pub mod derived;
pub mod fueling;
pub mod methodology;
pub mod order;
pub mod plan_dates;
pub mod profile;
pub mod weekly_structure;
pub mod workout;

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::atomic::write_atomic_str;
use crate::error::StageError;

/// Serializes `value` as YAML and writes it atomically, so every stage's
/// intermediate output is a self-describing text document.
pub fn save_document<T: Serialize>(path: &Path, stage: &'static str, value: &T) -> Result<(), StageError> {
    let text = serde_yaml::to_string(value).map_err(|source| StageError::Schema { stage, source })?;
    write_atomic_str(path, &text).map_err(|source| StageError::Io { stage, source })?;
    Ok(())
}

/// Reads and parses a YAML document previously written by `save_document`.
/// A parse failure surfaces as a `Schema` error, signaling the producing
/// stage should be re-run rather than patched in place.
pub fn load_document<T: DeserializeOwned>(path: &Path, stage: &'static str) -> Result<T, StageError> {
    let text = std::fs::read_to_string(path).map_err(|source| StageError::Io { stage, source })?;
    serde_yaml::from_str(&text).map_err(|source| StageError::Schema { stage, source })
}
