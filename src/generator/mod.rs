// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text generation abstraction layer.
//!
//! This module provides a trait-based abstraction over language-model
//! backends, allowing the suggestion pipeline to run against any service
//! that turns a prompt into text.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::ChatCompletionsClient;

/// Text generation backend errors
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key found in the configured environment variable
    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    /// Network communication error (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Backend answered but the envelope could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend answered without any generated text
    #[error("Empty completion from {0}")]
    EmptyCompletion(String),

    /// Any other backend fault
    #[error("{0}")]
    Other(String),
}

/// Trait for text generation backends.
///
/// One method, prompt in, text out. Implementations must not retry on
/// their own; that decision belongs to whoever drives the pipeline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Send a prompt and return the raw response text.
    ///
    /// # Returns
    /// * `Ok(String)` with the generated text
    /// * `Err(GenerationError)` on network, auth, quota or other failures
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
