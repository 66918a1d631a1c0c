//! Agent client abstraction
//!
//! Both backends (HTTP transport / scripted mock) implement `AgentClient`:
//! hand over the transcript so far, get back the next reply.

use async_trait::async_trait;

use crate::core::TaskError;
use crate::llm::wire::{AgentReply, MessageParam};

/// External agent collaborator. The editor tool declaration travels with
/// every request; the reply is an ordered list of content blocks.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn next_turn(&self, messages: &[MessageParam]) -> Result<AgentReply, TaskError>;
}
