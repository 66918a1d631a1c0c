//! Agent collaborator boundary: wire types, client trait, backends

pub mod claude;
pub mod mock;
pub mod traits;
pub mod wire;

pub use claude::ClaudeClient;
pub use mock::{ScriptStep, ScriptedClient};
pub use traits::AgentClient;
pub use wire::{AgentReply, ContentBlock, MessageParam, Role, ToolSpec};
