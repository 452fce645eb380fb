// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! OpenAI-compatible chat completions backend.
//!
//! Sends the prompt as a single user message and returns the content of
//! the first choice. Works with any server exposing the same
//! `/chat/completions` shape.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{GenerationError, TextGenerator};
use crate::config::LlmConfig;

const USER_AGENT: &str = concat!("chordsmith/", env!("CARGO_PKG_VERSION"));

/// Chat completions request body
#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response body (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint
pub struct ChatCompletionsClient {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl ChatCompletionsClient {
    /// Create a client from configuration, reading the API key from the
    /// environment variable named in `config.api_key_env`
    pub fn from_config(config: &LlmConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: completions_url(&config.endpoint),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        }
    }
}

/// Append `/chat/completions` unless the base URL already ends with it
fn completions_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{}/chat/completions", base)
    }
}

/// Pull the generated text out of a decoded response
fn first_content(response: ChatResponse, model: &str) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| GenerationError::EmptyCompletion(model.to_string()))
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(
            url = %self.endpoint,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let content = first_content(decoded, &self.model)?;
        info!(
            model = %self.model,
            response_chars = content.len(),
            "Chat completion received"
        );
        Ok(content)
    }
}
