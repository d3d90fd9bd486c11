use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// MIME type requesting structured JSON output from the model.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Sampling and output-shape settings for one model call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub response_mime_type: &'static str,
}

impl GenerationParams {
    /// JSON output with the model's default sampling.
    pub const fn json() -> Self {
        Self {
            temperature: None,
            top_p: None,
            response_mime_type: JSON_MIME_TYPE,
        }
    }

    pub const fn with_sampling(self, temperature: f32, top_p: f32) -> Self {
        Self {
            temperature: Some(temperature),
            top_p: Some(top_p),
            response_mime_type: self.response_mime_type,
        }
    }
}

/// Model generation request payload.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Fixed role and output-shape description
    pub instruction: &'a str,
    /// Per-call content
    pub prompt: &'a str,
    pub params: GenerationParams,
}

/// Failure talking to the generative model service
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model provider misconfigured: {0}")]
    Configuration(String),

    #[error("Model request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Model request timed out")]
    Timeout,

    #[error("Model service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to decode model service response: {0}")]
    Decode(String),

    #[error("Model response did not contain any text")]
    EmptyResponse,
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs are never kept in error text.
        let err = err.without_url();
        if err.is_timeout() {
            ModelError::Timeout
        } else if err.is_decode() {
            ModelError::Decode(err.to_string())
        } else {
            ModelError::Transport(err)
        }
    }
}

/// A generative model: given an instruction, a prompt and generation
/// parameters, returns text believed to match the requested shape.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, ModelError>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>, ModelError> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_settings(settings)?)),
        other => Err(ModelError::Configuration(format!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ))),
    }
}
