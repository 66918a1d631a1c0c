//! Editor command engine: five backup-protected file operations
//!
//! `command` types the agent's raw tool input, `backup` owns the
//! single-generation snapshot, `engine` executes commands and renders every
//! outcome (success or failure) as a result string.

pub mod backup;
pub mod command;
pub mod engine;

pub use command::{EditorCommand, TOOL_NAME, TOOL_TYPE};
pub use engine::EditorEngine;
