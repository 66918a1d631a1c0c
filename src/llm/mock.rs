//! Scripted agent client (for tests, no API needed)
//!
//! Plays back a fixed queue of replies; an exhausted script or an injected
//! fault surfaces as a transport failure, same as the real backend would.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::TaskError;
use crate::editor::TOOL_NAME;
use crate::llm::traits::AgentClient;
use crate::llm::wire::{AgentReply, ContentBlock, MessageParam};

/// One scripted step: a canned reply or a simulated transport fault.
pub enum ScriptStep {
    Reply(AgentReply),
    Fail(String),
}

/// Scripted client: pops one step per call, in order.
pub struct ScriptedClient {
    steps: Mutex<VecDeque<ScriptStep>>,
}

impl ScriptedClient {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
        }
    }

    /// A reply consisting of a single text block (the loop's terminal shape).
    pub fn text_reply(text: &str) -> ScriptStep {
        ScriptStep::Reply(AgentReply {
            content: vec![ContentBlock::Text {
                text: text.to_string(),
            }],
        })
    }

    /// A reply invoking the editor tool once.
    pub fn tool_reply(id: &str, input: Value) -> ScriptStep {
        ScriptStep::Reply(AgentReply {
            content: vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: TOOL_NAME.to_string(),
                input,
            }],
        })
    }
}

#[async_trait]
impl AgentClient for ScriptedClient {
    async fn next_turn(&self, _messages: &[MessageParam]) -> Result<AgentReply, TaskError> {
        let step = self
            .steps
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .ok_or_else(|| TaskError::Transport("script exhausted".to_string()))?;
        match step {
            ScriptStep::Reply(reply) => Ok(reply),
            ScriptStep::Fail(reason) => Err(TaskError::Transport(reason)),
        }
    }
}
