//! Core types shared across the editor engine and the dispatch loop

pub mod error;

pub use error::{EditorError, TaskError};
