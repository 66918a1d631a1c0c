//! Dispatch loop
//!
//! The conversation state machine: send the transcript, act on at most the
//! first tool invocation of the reply, append the exchange, repeat. A reply
//! with no tool invocation is the sole success-terminal condition; a
//! transport failure triggers the retry-or-abort prompt without touching the
//! transcript.

use crate::console::Confirm;
use crate::editor::{EditorCommand, EditorEngine, TOOL_NAME};
use crate::llm::{AgentClient, ContentBlock};
use crate::task::transcript::Transcript;

/// Max characters of a tool result echoed to the log.
const RESULT_PREVIEW_CHARS: usize = 200;

/// Task lifecycle. `Running` only exists inside the loop; the other three
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Complete,
    Aborted,
    RoundLimitExceeded,
}

/// How one task run ended, with the full transcript for inspection.
#[derive(Debug)]
pub struct TaskOutcome {
    pub state: TaskState,
    pub rounds: usize,
    pub transcript: Transcript,
}

/// One task run's collaborators: agent client, command engine, confirmation
/// prompt, and the configured round cap.
pub struct TaskSession<'a> {
    client: &'a dyn AgentClient,
    engine: &'a EditorEngine,
    confirm: &'a dyn Confirm,
    max_rounds: usize,
}

impl<'a> TaskSession<'a> {
    pub fn new(
        client: &'a dyn AgentClient,
        engine: &'a EditorEngine,
        confirm: &'a dyn Confirm,
        max_rounds: usize,
    ) -> Self {
        Self {
            client,
            engine,
            confirm,
            max_rounds,
        }
    }

    /// Drive the conversation until a terminal state. Strictly sequential:
    /// one agent call, then at most one command, per round.
    pub async fn run(&self, file_path: &str, instruction: &str) -> TaskOutcome {
        let mut transcript = Transcript::start(file_path, instruction);
        let mut rounds = 0usize;
        let mut state = TaskState::Running;

        while state == TaskState::Running {
            if rounds >= self.max_rounds {
                tracing::warn!(max_rounds = self.max_rounds, "round limit exceeded");
                state = TaskState::RoundLimitExceeded;
                continue;
            }

            let reply = match self.client.next_turn(transcript.messages()).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(error = %e, "agent call failed");
                    // Transcript stays untouched; an affirmative answer
                    // returns to the same request unchanged.
                    if self.confirm.confirm("\nDo you want to continue? (y/n): ").await {
                        continue;
                    }
                    state = TaskState::Aborted;
                    continue;
                }
            };
            rounds += 1;

            let text = reply.text();
            if !text.is_empty() {
                tracing::info!(agent = %text, "agent message");
            }

            match reply.first_tool_use().cloned() {
                None => {
                    transcript.push_assistant(reply.content);
                    tracing::info!(rounds, "task complete");
                    state = TaskState::Complete;
                }
                Some(invocation) => {
                    let result = self.dispatch(&invocation).await;
                    tracing::info!(result = %preview(&result), "tool result");
                    transcript.push_tool_exchange(invocation, result);
                }
            }
        }

        TaskOutcome {
            state,
            rounds,
            transcript,
        }
    }

    /// Validate the invocation into a typed command and run it. Parse
    /// failures are reported the same way as engine failures, so the agent
    /// always gets a result string back.
    async fn dispatch(&self, invocation: &ContentBlock) -> String {
        let ContentBlock::ToolUse { name, input, .. } = invocation else {
            return "Error: Not a tool invocation".to_string();
        };
        if name != TOOL_NAME {
            return format!("Error: Unknown tool '{name}'");
        }
        match EditorCommand::from_input(input) {
            Ok(cmd) => self.engine.execute(&cmd).await,
            Err(e) => format!("Error: {e}"),
        }
    }
}

fn preview(s: &str) -> String {
    if s.chars().count() > RESULT_PREVIEW_CHARS {
        format!("{}...", s.chars().take(RESULT_PREVIEW_CHARS).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConfirm;
    use crate::llm::{ScriptStep, ScriptedClient};

    fn fixture(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        std::fs::write(&path, content).unwrap();
        (dir, path.to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn test_text_only_reply_completes_in_one_round() {
        let client = ScriptedClient::new(vec![ScriptedClient::text_reply("All done.")]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run("f.txt", "do nothing").await;
        assert_eq!(outcome.state, TaskState::Complete);
        assert_eq!(outcome.rounds, 1);
        // Seed turn plus the final agent turn.
        assert_eq!(outcome.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_tool_round_then_completion() {
        let (_dir, path) = fixture("hello old world\n");
        let client = ScriptedClient::new(vec![
            ScriptedClient::tool_reply(
                "toolu_01",
                serde_json::json!({
                    "command": "str_replace",
                    "path": &path,
                    "old_str": "old",
                    "new_str": "new"
                }),
            ),
            ScriptedClient::text_reply("Replaced it."),
        ]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run(&path, "replace old with new").await;
        assert_eq!(outcome.state, TaskState::Complete);
        assert_eq!(outcome.rounds, 2);
        // Seed, tool_use echo, tool_result, final agent turn.
        assert_eq!(outcome.transcript.len(), 4);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello new world\n");
    }

    #[tokio::test]
    async fn test_transport_failure_then_decline_aborts() {
        let client = ScriptedClient::new(vec![ScriptStep::Fail("rate limited".to_string())]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![false]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run("f.txt", "task").await;
        assert_eq!(outcome.state, TaskState::Aborted);
        assert_eq!(outcome.rounds, 0);
        // The failed round must not have mutated the transcript.
        assert_eq!(outcome.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_then_retry_continues() {
        let client = ScriptedClient::new(vec![
            ScriptStep::Fail("connection reset".to_string()),
            ScriptedClient::text_reply("Recovered."),
        ]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![true]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run("f.txt", "task").await;
        assert_eq!(outcome.state, TaskState::Complete);
        assert_eq!(outcome.rounds, 1);
    }

    #[tokio::test]
    async fn test_round_limit_terminates_distinctly() {
        let (_dir, path) = fixture("content\n");
        // An agent that never stops viewing.
        let steps = (0..10)
            .map(|i| {
                ScriptedClient::tool_reply(
                    &format!("toolu_{i}"),
                    serde_json::json!({ "command": "view", "path": &path }),
                )
            })
            .collect();
        let client = ScriptedClient::new(steps);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![]);
        let session = TaskSession::new(&client, &engine, &confirm, 3);

        let outcome = session.run(&path, "loop forever").await;
        assert_eq!(outcome.state, TaskState::RoundLimitExceeded);
        assert_eq!(outcome.rounds, 3);
    }

    #[tokio::test]
    async fn test_unknown_command_reported_as_result() {
        let (_dir, path) = fixture("content\n");
        let client = ScriptedClient::new(vec![
            ScriptedClient::tool_reply(
                "toolu_01",
                serde_json::json!({ "command": "shred", "path": &path }),
            ),
            ScriptedClient::text_reply("Giving up."),
        ]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run(&path, "task").await;
        assert_eq!(outcome.state, TaskState::Complete);
        match &outcome.transcript.messages()[2].content[0] {
            ContentBlock::ToolResult { content, .. } => {
                assert_eq!(content, "Error: Unknown command 'shred'");
            }
            other => panic!("unexpected block: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_only_first_tool_use_per_round_executes() {
        let (_dir, path) = fixture("a\nb\nc\n");
        let reply = crate::llm::AgentReply {
            content: vec![
                ContentBlock::ToolUse {
                    id: "toolu_a".to_string(),
                    name: TOOL_NAME.to_string(),
                    input: serde_json::json!({
                        "command": "insert", "path": &path,
                        "insert_line": 0, "new_str": "first"
                    }),
                },
                ContentBlock::ToolUse {
                    id: "toolu_b".to_string(),
                    name: TOOL_NAME.to_string(),
                    input: serde_json::json!({
                        "command": "insert", "path": &path,
                        "insert_line": 0, "new_str": "second"
                    }),
                },
            ],
        };
        let client = ScriptedClient::new(vec![
            ScriptStep::Reply(reply),
            ScriptedClient::text_reply("Done."),
        ]);
        let engine = EditorEngine::new();
        let confirm = ScriptedConfirm::new(vec![]);
        let session = TaskSession::new(&client, &engine, &confirm, 50);

        let outcome = session.run(&path, "task").await;
        assert_eq!(outcome.state, TaskState::Complete);
        // Only the first insert ran.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\na\nb\nc\n");
    }
}
