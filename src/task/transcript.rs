//! Conversation transcript
//!
//! Append-only ordered turns owned by the dispatch loop: seeded with the task
//! description, grown one round at a time, never mutated retroactively, and
//! discarded when the process ends.

use crate::llm::{ContentBlock, MessageParam};

/// Ordered turns of one task run. The only mutators append.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<MessageParam>,
}

impl Transcript {
    /// Seed with the fixed task description embedding the target path and
    /// the freeform instruction.
    pub fn start(file_path: &str, instruction: &str) -> Self {
        let task = format!(
            "I need you to help refactor my {file_path} file. {instruction} \
             Please use the text editor tool to view and modify the file."
        );
        Self {
            messages: vec![MessageParam::user_text(task)],
        }
    }

    pub fn messages(&self) -> &[MessageParam] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Final agent turn, appended verbatim when the task completes.
    pub fn push_assistant(&mut self, content: Vec<ContentBlock>) {
        self.messages.push(MessageParam::assistant(content));
    }

    /// One executed command: the invocation echoed back as an assistant turn,
    /// then its result wrapped as a tool_result turn correlated by id.
    pub fn push_tool_exchange(&mut self, invocation: ContentBlock, result: String) {
        let tool_use_id = match &invocation {
            ContentBlock::ToolUse { id, .. } => id.clone(),
            // Callers only hand tool_use blocks here; correlate best-effort
            // rather than panic if that ever changes.
            _ => String::new(),
        };
        self.messages.push(MessageParam::assistant(vec![invocation]));
        self.messages
            .push(MessageParam::user(vec![ContentBlock::ToolResult {
                tool_use_id,
                content: result,
            }]));
    }
}
