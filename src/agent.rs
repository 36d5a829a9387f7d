//! LLM agent module for summarization.
//!
//! Groq and OpenAI are reached through their OpenAI-compatible chat completions
//! endpoint; Gemini goes through rstructor.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Turns a filled prompt into generated text.
pub trait Summariser {
    /// Model identifier reported alongside the summary
    fn model(&self) -> &str;

    /// Whether credentials are present; checked before any network activity
    fn has_credentials(&self) -> bool;

    fn summarise(&self, prompt: &str) -> impl Future<Output = Result<String, AgentError>>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Minimal client for OpenAI-compatible chat completions APIs.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a single user message and return the first choice's content
    pub async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, AgentError> {
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let endpoint = format!("{}/chat/completions", self.base_url);
        tracing::debug!(%endpoint, model, prompt_chars = prompt.len(), "sending completion request");

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to reach model endpoint"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AgentError::Api { status, message });
        }

        let response: ChatResponse = resp.json().await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AgentError::EmptyResponse)
    }
}

enum Backend {
    Chat(ChatClient),
    Gemini { api_key: String },
}

/// Summariser for the configured provider.
pub struct LlmSummariser {
    backend: Backend,
    model: String,
    temperature: Option<f32>,
    has_credentials: bool,
}

impl LlmSummariser {
    /// Build the summariser from configuration.
    ///
    /// A missing API key is not an error here; it is reported by
    /// [`Summariser::has_credentials`] so the pipeline can reject the request
    /// before touching the network.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        let api_key = config.api_key().map(str::to_string).ok();
        let has_credentials = api_key.is_some();
        let api_key = api_key.unwrap_or_default();
        let agent = &config.agent;

        let backend = match agent.provider.default_base_url() {
            Some(default_base_url) => {
                let base_url = agent.base_url.as_deref().unwrap_or(default_base_url);
                Backend::Chat(ChatClient::new(
                    api_key,
                    base_url,
                    Duration::from_secs(agent.timeout_secs()),
                )?)
            }
            None => Backend::Gemini { api_key },
        };

        tracing::debug!(provider = %agent.provider, model = agent.model(), "summariser ready");

        Ok(Self {
            backend,
            model: agent.model().to_string(),
            temperature: agent.temperature,
            has_credentials,
        })
    }

    async fn summarise_gemini(&self, api_key: &str, prompt: &str) -> Result<String, AgentError> {
        let client = GeminiClient::new(api_key)
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(&self.model));

        let result = client
            .generate_with_metadata(prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        if result.text.trim().is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(result.text)
    }
}

impl Summariser for LlmSummariser {
    fn model(&self) -> &str {
        &self.model
    }

    fn has_credentials(&self) -> bool {
        self.has_credentials
    }

    async fn summarise(&self, prompt: &str) -> Result<String, AgentError> {
        match &self.backend {
            Backend::Chat(client) => client.complete(&self.model, prompt, self.temperature).await,
            Backend::Gemini { api_key } => self.summarise_gemini(api_key, prompt).await,
        }
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        other => {
            tracing::warn!(model = other, "unknown Gemini model, using gemini-2.0-flash");
            GeminiModel::Gemini20Flash
        }
    }
}
