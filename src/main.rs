//! Quill - conversation-driven text file editor
//!
//! Entry point: initialize logging, load configuration, check the credential
//! and the target file, then hand the task to the dispatch loop.

use std::path::Path;

use anyhow::Context;

use quill::config::load_config;
use quill::console::StdinConfirm;
use quill::editor::EditorEngine;
use quill::llm::ClaudeClient;
use quill::task::{TaskSession, TaskState};

const DEFAULT_INSTRUCTION: &str = "Refactor the code to be more readable and maintainable.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quill::observability::init();

    let cfg = load_config(None).context("Failed to load configuration")?;

    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY environment variable is not set")?;

    // Target file: first CLI argument, falling back to configuration.
    let mut args = std::env::args().skip(1);
    let file_path = args
        .next()
        .or_else(|| {
            cfg.app
                .target_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
        })
        .context("No target file given (pass a path or set app.target_file)")?;
    let instruction = args.next().unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());

    if !Path::new(&file_path).exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let client = ClaudeClient::new(
        api_key,
        &cfg.llm.model,
        cfg.llm.max_tokens,
        cfg.llm.request_timeout_secs,
    );
    let engine = EditorEngine::new();
    let confirm = StdinConfirm;
    let session = TaskSession::new(&client, &engine, &confirm, cfg.task.max_rounds);

    tracing::info!(file = %file_path, %instruction, "starting task");
    let outcome = session.run(&file_path, &instruction).await;

    match outcome.state {
        TaskState::Complete => {
            tracing::info!(rounds = outcome.rounds, "task completed");
            Ok(())
        }
        TaskState::Aborted => anyhow::bail!("Task aborted by user after {} rounds", outcome.rounds),
        TaskState::RoundLimitExceeded => {
            anyhow::bail!("Round limit exceeded after {} rounds", outcome.rounds)
        }
        TaskState::Running => unreachable!("loop returned while still running"),
    }
}
