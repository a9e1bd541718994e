//! LLM Client: the single point of entry for all Gemini API calls.
//!
//! No other module may call the Gemini API directly. Callers depend on the
//! `TextGenerator` trait; `ChatSession` is the production implementation.
//!
//! Calls are made once: no retry, no backoff, no client-side timeout.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[cfg(test)]
pub mod mock;
pub mod prompts;
pub mod settings;

pub use settings::GeminiConfig;
use settings::{GenerationConfig, SafetySetting};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked by safety filter: {0}")]
    Blocked(String),

    #[error("LLM returned empty content (finish reason: {0})")]
    EmptyContent(String),
}

/// Anything that can turn a prompt into a text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn send_message(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning parts emitted by thinking models; never part of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self::with_role("user", text)
    }

    pub fn model(text: &str) -> Self {
        Self::with_role("model", text)
    }

    fn with_role(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.to_string()),
                thought: None,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the non-thought text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn finish_reason(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Stateless Gemini transport. Cheap to clone; shares one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Opens a chat session bound to this client's configuration.
    pub fn start_chat(&self) -> ChatSession {
        ChatSession {
            client: self.clone(),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes a single `generateContent` call with the configured sampling and safety settings.
    pub async fn generate_content(
        &self,
        contents: &[Content],
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents,
            generation_config: &self.config.generation,
            safety_settings: &self.config.safety,
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(body)
    }
}

/// Pulls `error.message` out of a Gemini error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// A chat handle. Keeps the last `history_turns` exchanges and resends them
/// as context. The history lock is never held across the HTTP call, so
/// concurrent messages on one session run in parallel.
#[derive(Clone)]
pub struct ChatSession {
    client: GeminiClient,
    history: Arc<Mutex<Vec<Content>>>,
}

#[cfg(test)]
impl ChatSession {
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[async_trait]
impl TextGenerator for ChatSession {
    async fn send_message(&self, prompt: &str) -> Result<String, LlmError> {
        let turns = self.client.config.history_turns;
        let user_turn = Content::user(prompt);

        if turns == 0 {
            let response = self
                .client
                .generate_content(std::slice::from_ref(&user_turn))
                .await?;
            return extract_text(&response);
        }

        let mut contents = self.history.lock().await.clone();
        contents.push(user_turn.clone());

        let response = self.client.generate_content(&contents).await?;
        let text = extract_text(&response)?;

        let mut history = self.history.lock().await;
        history.push(user_turn);
        history.push(Content::model(&text));
        trim_history(&mut history, turns);

        Ok(text)
    }
}

fn extract_text(response: &GenerateContentResponse) -> Result<String, LlmError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(LlmError::Blocked(reason));
    }
    response
        .text()
        .ok_or_else(|| LlmError::EmptyContent(response.finish_reason()))
}

/// Drops the oldest exchanges so at most `turns` user/model pairs remain.
fn trim_history(history: &mut Vec<Content>, turns: usize) {
    let keep = turns * 2;
    if history.len() > keep {
        let excess = history.len() - keep;
        history.drain(..excess);
    }
}
