//! Atomic persistence primitives: every produced document is written to a
//! sibling temporary file in the same directory, then moved into place with
//! a single rename so a crash mid-write leaves only the temp file as residue
//! and never a truncated destination. Directory replacement follows the same
//! write-temp / rename-to-backup / rename-in / delete-backup shape, restoring
//! the backup on any failure partway through.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Writes `contents` to `path` atomically: the temp file is created
/// alongside `path` (same directory, so the final rename is on the same
/// filesystem) and renamed into place only after a successful flush.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn write_atomic_str(path: &Path, contents: &str) -> std::io::Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Atomically replaces `target_dir`'s contents with `staged_dir`'s contents.
///
/// Sequence: rename `target_dir` to a sibling backup directory (no-op if
/// `target_dir` does not yet exist), rename `staged_dir` into `target_dir`,
/// then delete the backup. If the second rename fails, the backup is moved
/// back into place so `target_dir` is never left absent or half-written.
pub fn replace_dir_atomic(target_dir: &Path, staged_dir: &Path) -> std::io::Result<()> {
    let backup_dir = sibling_path(target_dir, ".bak");

    let had_previous = target_dir.exists();
    if had_previous {
        if backup_dir.exists() {
            fs::remove_dir_all(&backup_dir)?;
        }
        fs::rename(target_dir, &backup_dir)?;
    }

    match fs::rename(staged_dir, target_dir) {
        Ok(()) => {
            if had_previous {
                fs::remove_dir_all(&backup_dir)?;
            }
            Ok(())
        }
        Err(e) => {
            if had_previous {
                // best-effort restore; surface the original error regardless
                let _ = fs::rename(&backup_dir, target_dir);
            }
            Err(e)
        }
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_creates_file_with_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        write_atomic_str(&path, "hello: world\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello: world\n");
    }

    #[test]
    fn write_atomic_overwrites_previous_content_fully() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        write_atomic_str(&path, "a: 1\nb: 2\n").unwrap();
        write_atomic_str(&path, "a: 1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
    }

    #[test]
    fn replace_dir_atomic_swaps_contents_and_cleans_backup() {
        let root = tempdir().unwrap();
        let target = root.path().join("workouts");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("old.xml"), "old").unwrap();

        let staged = root.path().join("workouts.staging");
        fs::create_dir_all(&staged).unwrap();
        fs::write(staged.join("new.xml"), "new").unwrap();

        replace_dir_atomic(&target, &staged).unwrap();

        assert!(target.join("new.xml").exists());
        assert!(!target.join("old.xml").exists());
        assert!(!root.path().join("workouts.bak").exists());
        assert!(!staged.exists());
    }

    #[test]
    fn replace_dir_atomic_first_run_with_no_previous_dir() {
        let root = tempdir().unwrap();
        let target = root.path().join("workouts");
        let staged = root.path().join("workouts.staging");
        fs::create_dir_all(&staged).unwrap();
        fs::write(staged.join("new.xml"), "new").unwrap();

        replace_dir_atomic(&target, &staged).unwrap();
        assert!(target.join("new.xml").exists());
    }
}
