//! Typed editor commands
//!
//! The agent's `tool_use` input is open-ended JSON; it is converted into a
//! closed `EditorCommand` variant here, at the dispatch boundary, so the
//! engine only ever sees presence-checked, fully-typed arguments.

use serde_json::Value;

use crate::core::EditorError;

/// Tool name declared to the agent (fixed by the text editor tool contract).
pub const TOOL_NAME: &str = "str_replace_editor";
/// Tool type identifier for the API tool declaration.
pub const TOOL_TYPE: &str = "text_editor_20250124";

/// One editor command with its arguments, one variant per supported command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Show file content, optionally restricted to a 1-based inclusive range
    /// where `end == -1` means "to end of file".
    View {
        path: String,
        range: Option<(i64, i64)>,
    },
    /// Replace a uniquely-occurring literal substring.
    StrReplace {
        path: String,
        old_str: String,
        new_str: String,
    },
    /// Splice one new line before the existing zero-based line offset.
    Insert {
        path: String,
        insert_line: i64,
        text: String,
    },
    /// Write a file from scratch, backing up any previous content.
    Create { path: String, file_text: String },
    /// Restore the file from its single-generation backup.
    UndoEdit { path: String },
}

impl EditorCommand {
    /// Build a command from a `tool_use` input payload. Presence and type
    /// checks happen here; range/line bounds are checked by the engine, which
    /// knows the file's line count.
    pub fn from_input(input: &Value) -> Result<Self, EditorError> {
        let command = str_arg(input, "command").unwrap_or_default();
        let path = str_arg(input, "path")
            .ok_or(EditorError::MissingArgument("path"))?
            .to_string();

        match command {
            "view" => Ok(EditorCommand::View {
                path,
                range: view_range(input)?,
            }),
            "str_replace" => Ok(EditorCommand::StrReplace {
                path,
                old_str: str_arg(input, "old_str")
                    .ok_or(EditorError::MissingArgument("old_str"))?
                    .to_string(),
                new_str: str_arg(input, "new_str")
                    .ok_or(EditorError::MissingArgument("new_str"))?
                    .to_string(),
            }),
            "insert" => Ok(EditorCommand::Insert {
                path,
                insert_line: input
                    .get("insert_line")
                    .and_then(Value::as_i64)
                    .ok_or(EditorError::MissingArgument("insert_line"))?,
                text: str_arg(input, "new_str")
                    .ok_or(EditorError::MissingArgument("new_str"))?
                    .to_string(),
            }),
            "create" => Ok(EditorCommand::Create {
                path,
                file_text: str_arg(input, "file_text")
                    .ok_or(EditorError::MissingArgument("file_text"))?
                    .to_string(),
            }),
            "undo_edit" => Ok(EditorCommand::UndoEdit { path }),
            other => Err(EditorError::UnknownCommand(other.to_string())),
        }
    }

    /// Command name as it appears in the tool contract.
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::View { .. } => "view",
            EditorCommand::StrReplace { .. } => "str_replace",
            EditorCommand::Insert { .. } => "insert",
            EditorCommand::Create { .. } => "create",
            EditorCommand::UndoEdit { .. } => "undo_edit",
        }
    }

    /// Target file path.
    pub fn path(&self) -> &str {
        match self {
            EditorCommand::View { path, .. }
            | EditorCommand::StrReplace { path, .. }
            | EditorCommand::Insert { path, .. }
            | EditorCommand::Create { path, .. }
            | EditorCommand::UndoEdit { path } => path,
        }
    }
}

fn str_arg<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

/// `view_range` is an optional `[start, end]` pair of integers.
fn view_range(input: &Value) -> Result<Option<(i64, i64)>, EditorError> {
    let Some(raw) = input.get("view_range") else {
        return Ok(None);
    };
    if raw.is_null() {
        return Ok(None);
    }
    let pair = raw
        .as_array()
        .filter(|a| a.len() == 2)
        .and_then(|a| Some((a[0].as_i64()?, a[1].as_i64()?)))
        .ok_or(EditorError::MissingArgument("view_range"))?;
    Ok(Some(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_with_range() {
        let input = serde_json::json!({
            "command": "view",
            "path": "notes.txt",
            "view_range": [2, -1]
        });
        let cmd = EditorCommand::from_input(&input).unwrap();
        assert_eq!(
            cmd,
            EditorCommand::View {
                path: "notes.txt".to_string(),
                range: Some((2, -1)),
            }
        );
        assert_eq!(cmd.name(), "view");
        assert_eq!(cmd.path(), "notes.txt");
    }

    #[test]
    fn test_parse_view_without_range() {
        let input = serde_json::json!({ "command": "view", "path": "notes.txt" });
        let cmd = EditorCommand::from_input(&input).unwrap();
        assert!(matches!(cmd, EditorCommand::View { range: None, .. }));
    }

    #[test]
    fn test_str_replace_requires_new_str() {
        let input = serde_json::json!({
            "command": "str_replace",
            "path": "notes.txt",
            "old_str": "foo"
        });
        let err = EditorCommand::from_input(&input).unwrap_err();
        assert!(matches!(err, EditorError::MissingArgument("new_str")));
    }

    #[test]
    fn test_unknown_command_rejected() {
        let input = serde_json::json!({ "command": "truncate", "path": "notes.txt" });
        let err = EditorCommand::from_input(&input).unwrap_err();
        assert!(matches!(err, EditorError::UnknownCommand(c) if c == "truncate"));
    }

    #[test]
    fn test_missing_path_rejected() {
        let input = serde_json::json!({ "command": "view" });
        let err = EditorCommand::from_input(&input).unwrap_err();
        assert!(matches!(err, EditorError::MissingArgument("path")));
    }

    #[test]
    fn test_malformed_view_range_rejected() {
        let input = serde_json::json!({
            "command": "view",
            "path": "notes.txt",
            "view_range": [1]
        });
        assert!(EditorCommand::from_input(&input).is_err());
    }

    #[test]
    fn test_parse_insert() {
        let input = serde_json::json!({
            "command": "insert",
            "path": "notes.txt",
            "insert_line": 3,
            "new_str": "a new line"
        });
        let cmd = EditorCommand::from_input(&input).unwrap();
        assert_eq!(
            cmd,
            EditorCommand::Insert {
                path: "notes.txt".to_string(),
                insert_line: 3,
                text: "a new line".to_string(),
            }
        );
    }
}
