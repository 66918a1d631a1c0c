//! Quill - conversation-driven text file editor
//!
//! Module layout:
//! - **config**: application configuration (TOML + environment)
//! - **console**: retry-or-abort confirmation prompt
//! - **core**: shared error types
//! - **editor**: the five backup-protected editor commands
//! - **llm**: agent collaborator boundary (wire types, HTTP transport, mock)
//! - **observability**: logging setup
//! - **task**: transcript and the dispatch-loop state machine

pub mod config;
pub mod console;
pub mod core;
pub mod editor;
pub mod llm;
pub mod observability;
pub mod task;
