//! debrief - Meeting transcript analysis over a generative language model
//!
//! Summarizes a meeting, surfaces counterpoints and unpursued ideas, and
//! assigns action items, served over HTTP or run from the command line.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod server;
pub mod transcript;

use std::time::Duration;

use thiserror::Error;

use crate::analysis::{PipelineError, ResultParsingError};
use crate::llm::ModelError;
use crate::transcript::TranscriptError;

/// Main error type for debrief
#[derive(Error, Debug)]
pub enum DebriefError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    InvalidTranscript(#[from] TranscriptError),

    #[error(transparent)]
    ModelInvocation(#[from] ModelError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Error parsing results: {0}")]
    ResultParsing(#[from] ResultParsingError),

    #[error("Analysis timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, DebriefError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "debrief";
