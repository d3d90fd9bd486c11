//! LLM module for debrief
//!
//! Wraps the generative model behind [`LlmProvider`] and holds the
//! per-stage prompts.

mod client;
mod gemini;
pub mod prompts;

pub use client::{
    build_provider, GenerationParams, GenerationRequest, LlmProvider, ModelError, JSON_MIME_TYPE,
};
pub use gemini::GeminiClient;
