//! Editor and task error types
//!
//! Every `EditorError` is recovered inside the engine and rendered into the
//! `Error: ...` result string the agent sees; nothing in this enum crosses the
//! engine boundary as `Err`. `TaskError` is the one true control-flow
//! interruption, answered by the dispatch loop's retry-or-abort prompt.

use thiserror::Error;

/// Failure modes of the five editor commands. The `Display` text doubles as
/// the message shown to the agent, so it states what to fix.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("File not found")]
    NotFound,

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("No match found for replacement. Please check your text and try again.")]
    NoMatch,

    #[error("Found {0} matches for replacement text. Please provide more context to make a unique match.")]
    AmbiguousMatch(usize),

    #[error("Invalid insert line. The file has {0} lines.")]
    InvalidRange(usize),

    #[error("No backup found for {0}")]
    NoBackup(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}

impl EditorError {
    /// Map an I/O fault: a missing file keeps its dedicated variant, anything
    /// else (permissions, disk full, directory creation) is a storage error.
    pub fn from_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            EditorError::NotFound
        } else {
            EditorError::Storage(err.to_string())
        }
    }
}

/// Dispatch-loop level failure: the agent call itself errored (network, auth,
/// rate limit). The transcript is left untouched when this is raised.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Agent transport failure: {0}")]
    Transport(String),
}
