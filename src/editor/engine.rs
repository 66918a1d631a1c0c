//! Editor command engine
//!
//! Applies exactly one command to exactly one file per call. The engine holds
//! no file handles and no cross-command caches; every operation re-reads the
//! file from disk, so the on-disk backup is its only state. Failures never
//! escape `execute` as `Err`: they are rendered into the `Error: ...` result
//! string the agent observes and can react to.

use std::path::Path;

use crate::core::EditorError;
use crate::editor::backup;
use crate::editor::command::EditorCommand;

/// Stateless command engine over a single text file.
#[derive(Debug, Default)]
pub struct EditorEngine;

impl EditorEngine {
    pub fn new() -> Self {
        Self
    }

    /// Execute one command and report the outcome as a human-readable string.
    /// Success and failure share the same channel; failures carry the
    /// `Error:` prefix so callers can detect them programmatically.
    pub async fn execute(&self, cmd: &EditorCommand) -> String {
        tracing::info!(command = cmd.name(), path = cmd.path(), "editor command");
        let result = match cmd {
            EditorCommand::View { path, range } => self.view(path, *range).await,
            EditorCommand::StrReplace {
                path,
                old_str,
                new_str,
            } => self.str_replace(path, old_str, new_str).await,
            EditorCommand::Insert {
                path,
                insert_line,
                text,
            } => self.insert(path, *insert_line, text).await,
            EditorCommand::Create { path, file_text } => self.create(path, file_text).await,
            EditorCommand::UndoEdit { path } => self.undo_edit(path).await,
        };
        match result {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(command = cmd.name(), error = %e, "editor command failed");
                format!("Error: {e}")
            }
        }
    }

    /// Read-only: return the requested lines, numbered by their 1-based
    /// position in the original file (not in the slice).
    async fn view(&self, path: &str, range: Option<(i64, i64)>) -> Result<String, EditorError> {
        let content = read_file(path).await?;
        let lines: Vec<&str> = content.split('\n').collect();

        let (start_idx, end_idx) = match range {
            None => (0, lines.len()),
            Some((start, end)) => {
                let start_idx = ((start - 1).max(0) as usize).min(lines.len());
                let end_idx = if end == -1 {
                    lines.len()
                } else {
                    (end.max(0) as usize).min(lines.len())
                };
                (start_idx, end_idx.max(start_idx))
            }
        };

        let numbered: Vec<String> = lines[start_idx..end_idx]
            .iter()
            .enumerate()
            .map(|(idx, line)| format!("{}: {}", start_idx + idx + 1, line))
            .collect();
        Ok(numbered.join("\n"))
    }

    /// Replace a literal substring that occurs exactly once in the full file
    /// content. Zero or multiple occurrences leave the file untouched; the
    /// backup is taken only after uniqueness is established, always before
    /// the destructive write.
    async fn str_replace(
        &self,
        path: &str,
        old_str: &str,
        new_str: &str,
    ) -> Result<String, EditorError> {
        let content = read_file(path).await?;

        let match_count = content.matches(old_str).count();
        if match_count == 0 {
            return Err(EditorError::NoMatch);
        }
        if match_count > 1 {
            return Err(EditorError::AmbiguousMatch(match_count));
        }

        backup::snapshot(Path::new(path)).await?;

        let new_content = content.replacen(old_str, new_str, 1);
        write_file(path, &new_content).await?;
        Ok("Successfully replaced text at exactly one location.".to_string())
    }

    /// Splice `text` as a single new line before the existing line at the
    /// zero-based offset; an offset equal to the line count appends.
    async fn insert(&self, path: &str, insert_line: i64, text: &str) -> Result<String, EditorError> {
        let content = read_file(path).await?;
        let mut lines: Vec<&str> = content.split('\n').collect();

        if insert_line < 0 || insert_line as usize > lines.len() {
            return Err(EditorError::InvalidRange(lines.len()));
        }

        backup::snapshot(Path::new(path)).await?;

        lines.insert(insert_line as usize, text);
        write_file(path, &lines.join("\n")).await?;
        Ok(format!("Successfully inserted text at line {insert_line}"))
    }

    /// Write `file_text` as the new full content. A pre-existing file is
    /// never a failure; its content is backed up before being overwritten.
    async fn create(&self, path: &str, file_text: &str) -> Result<String, EditorError> {
        let target = Path::new(path);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| EditorError::Storage(e.to_string()))?;
            }
        }

        if tokio::fs::try_exists(target).await.unwrap_or(false) {
            backup::snapshot(target).await?;
        }

        tokio::fs::write(target, file_text)
            .await
            .map_err(|e| EditorError::Storage(e.to_string()))?;
        Ok(format!("Successfully created file at {path}"))
    }

    async fn undo_edit(&self, path: &str) -> Result<String, EditorError> {
        backup::restore(Path::new(path)).await?;
        Ok(format!("Successfully restored {path} from backup"))
    }
}

async fn read_file(path: &str) -> Result<String, EditorError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(EditorError::from_io)
}

async fn write_file(path: &str, content: &str) -> Result<(), EditorError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| EditorError::Storage(e.to_string()))
}
