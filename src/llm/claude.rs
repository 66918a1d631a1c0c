//! Anthropic Messages API transport
//!
//! Thin reqwest client for POST /v1/messages with the text editor tool
//! declared. Any fault (network, auth, rate limit, decode) maps to
//! `TaskError::Transport`; retry policy lives in the dispatch loop, not here.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::TaskError;
use crate::llm::traits::AgentClient;
use crate::llm::wire::{AgentReply, MessageParam, ToolSpec};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// HTTP client for the agent collaborator.
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        request_timeout_secs: u64,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl AgentClient for ClaudeClient {
    async fn next_turn(&self, messages: &[MessageParam]) -> Result<AgentReply, TaskError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "tools": [ToolSpec::text_editor()],
            "messages": messages,
        });

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TaskError::Transport(format!(
                "API returned {status}: {detail}"
            )));
        }

        response
            .json::<AgentReply>()
            .await
            .map_err(|e| TaskError::Transport(format!("Malformed response: {e}")))
    }
}
