//! Backup lifecycle
//!
//! One snapshot per file at `<path>.backup`, overwritten on each
//! backup-eligible mutation and created lazily on first mutation. `restore`
//! leaves the backup in place, so a second undo is an idempotent no-op.

use std::path::{Path, PathBuf};

use crate::core::EditorError;

/// Sibling backup path: the suffix is appended, never substituted for an
/// existing extension (`notes.txt` -> `notes.txt.backup`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".backup");
    PathBuf::from(raw)
}

/// Snapshot the file's current content, overwriting any previous generation.
/// A missing source is not an error: there is simply nothing to back up yet.
pub async fn snapshot(path: &Path) -> Result<(), EditorError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }
    tokio::fs::copy(path, backup_path(path))
        .await
        .map_err(|e| EditorError::Storage(format!("Failed to create backup: {e}")))?;
    tracing::debug!(path = %path.display(), "backup written");
    Ok(())
}

/// Copy the backup back over the live file. Fails with `NoBackup` when no
/// snapshot exists; on copy failure the live file is left unchanged.
pub async fn restore(path: &Path) -> Result<(), EditorError> {
    let backup = backup_path(path);
    if !tokio::fs::try_exists(&backup).await.unwrap_or(false) {
        return Err(EditorError::NoBackup(path.display().to_string()));
    }
    tokio::fs::copy(&backup, path)
        .await
        .map_err(|e| EditorError::Storage(format!("Failed to restore backup: {e}")))?;
    Ok(())
}
