//! Wire types for the agent messages contract
//!
//! Serde shapes for the Anthropic-style conversation: role-tagged messages
//! whose content is an ordered list of `text` / `tool_use` / `tool_result`
//! blocks, plus the built-in text editor tool declaration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::{TOOL_NAME, TOOL_TYPE};

/// Message role as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One content block. The agent emits `Text` and `ToolUse`; the loop replies
/// with `ToolResult` correlated by the originating invocation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageParam {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl MessageParam {
    pub fn user(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![ContentBlock::Text { text: text.into() }])
    }
}

/// Declaration of the built-in text editor tool sent with every request.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub name: &'static str,
}

impl ToolSpec {
    pub fn text_editor() -> Self {
        Self {
            tool_type: TOOL_TYPE,
            name: TOOL_NAME,
        }
    }
}

/// The agent's reply: an ordered list of content blocks. Other response
/// fields (id, model, usage) are irrelevant here and ignored on decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentReply {
    pub content: Vec<ContentBlock>,
}

impl AgentReply {
    /// First `tool_use` block, if any. Only this one is acted upon per round;
    /// later tool blocks in the same reply are ignored by design.
    pub fn first_tool_use(&self) -> Option<&ContentBlock> {
        self.content
            .iter()
            .find(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// Concatenated text blocks, for operator-facing logging.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
