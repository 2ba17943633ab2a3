//! OpenAI-compatible chat-completions client

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::board::{Board, Stone};
use crate::config::AdvisorSettings;
use crate::error::AdvisorError;

use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::MoveAdvisor;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    n: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Advisor backed by a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiAdvisor {
    client: reqwest::Client,
    settings: AdvisorSettings,
}

impl OpenAiAdvisor {
    /// Creates a client for the configured endpoint.
    #[instrument(skip(settings), fields(model = %settings.model))]
    pub fn new(settings: AdvisorSettings) -> Self {
        info!(endpoint = %settings.endpoint(), "creating advisor client");
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    fn request_body<'a>(&'a self, prompt: String) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            n: 1,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
        }
    }
}

#[async_trait::async_trait]
impl MoveAdvisor for OpenAiAdvisor {
    #[instrument(skip(self, board), fields(model = %self.settings.model, side = side.name()))]
    async fn suggest(&self, board: &Board, side: Stone) -> Result<String, AdvisorError> {
        let body = self.request_body(build_prompt(board, side));

        debug!("sending advisor request");
        let response = self
            .client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "advisor request failed");
                AdvisorError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, response = %body, "advisor API error");
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(AdvisorError::EmptyResponse)?;

        info!(reply = %content, "advisor replied");
        Ok(content)
    }
}
