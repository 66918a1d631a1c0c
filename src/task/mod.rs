//! Dispatch loop: transcript ownership and the per-round state machine

pub mod loop_;
pub mod transcript;

pub use loop_::{TaskOutcome, TaskSession, TaskState};
pub use transcript::Transcript;
