//! User confirmation prompt
//!
//! The dispatch loop's only cancellation point: after an agent-call failure
//! it asks whether to retry. Behind a trait so tests can script the answer.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Yes/no prompt. Returns true on the affirmative answer.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Reads the answer from stdin; only a case-insensitive `y` counts as yes.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt}");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if reader.read_line(&mut answer).await.is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }
}

/// Scripted answers for tests; an exhausted script answers no.
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
}

impl ScriptedConfirm {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.answers
            .lock()
            .expect("confirm mutex poisoned")
            .pop_front()
            .unwrap_or(false)
    }
}
