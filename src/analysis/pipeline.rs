//! Three-stage analysis pipeline orchestration

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{assemble, AnalysisReport, RawResults, Stage};
use crate::llm::prompts::{build_actions_prompt, build_counterpoints_prompt, build_summary_prompt};
use crate::llm::{GenerationRequest, LlmProvider, ModelError};
use crate::transcript::Transcript;

/// A model call failed; the remaining stages were not run.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: ModelError,
}

/// Where a pipeline run currently is. Strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Summarizing,
    ExtractingCounterpoints,
    AssigningActions,
    Done,
}

/// Data threaded from one stage into the next.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub state: PipelineState,

    /// Utterance texts joined with spaces
    pub transcript_text: String,

    /// Stage 1 raw output, passed verbatim to stage 2
    pub summary_raw: String,

    /// Derived from stage 1 for stage 3; empty when stage 1 did not decode
    pub action_items: Vec<String>,

    /// Stage 2 raw output
    pub analysis_raw: String,
}

impl PipelineContext {
    pub fn new(transcript: &Transcript) -> Self {
        Self {
            state: PipelineState::Summarizing,
            transcript_text: transcript.flatten_text(),
            summary_raw: String::new(),
            action_items: Vec::new(),
            analysis_raw: String::new(),
        }
    }
}

/// Runs summary, counterpoints and action assignment in order against one
/// model provider.
#[derive(Clone)]
pub struct AnalysisPipeline {
    provider: Arc<dyn LlmProvider>,
}

impl AnalysisPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Run all three stages and return their raw output.
    ///
    /// Fails only when a model call fails. Output that does not parse is
    /// left for [`crate::analysis::assemble`] to report.
    pub async fn run(&self, transcript: &Transcript) -> Result<RawResults, PipelineError> {
        let mut ctx = PipelineContext::new(transcript);

        self.summarize(&mut ctx).await?;
        info!("Meeting summary generated");

        self.extract_counterpoints(&mut ctx).await?;
        info!("Counterpoints and ideas extracted");

        let actions_raw = self.assign_actions(&mut ctx).await?;
        info!("Actions and responsibilities assigned");

        Ok(RawResults {
            summary: ctx.summary_raw,
            analysis: ctx.analysis_raw,
            actions: actions_raw,
        })
    }

    /// Run the pipeline and decode every stage's output.
    pub async fn analyze(&self, transcript: &Transcript) -> crate::Result<AnalysisReport> {
        let raw = self.run(transcript).await?;
        Ok(assemble(raw)?)
    }

    async fn summarize(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        debug_assert_eq!(ctx.state, PipelineState::Summarizing);

        let prompt = build_summary_prompt(&ctx.transcript_text);
        let raw = self.invoke(Stage::Summary, &prompt).await?;

        ctx.action_items = extract_action_items(&raw);
        ctx.summary_raw = raw;
        ctx.state = PipelineState::ExtractingCounterpoints;
        Ok(())
    }

    async fn extract_counterpoints(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        debug_assert_eq!(ctx.state, PipelineState::ExtractingCounterpoints);

        let prompt = build_counterpoints_prompt(&ctx.transcript_text, &ctx.summary_raw);
        ctx.analysis_raw = self.invoke(Stage::Analysis, &prompt).await?;
        ctx.state = PipelineState::AssigningActions;
        Ok(())
    }

    async fn assign_actions(&self, ctx: &mut PipelineContext) -> Result<String, PipelineError> {
        debug_assert_eq!(ctx.state, PipelineState::AssigningActions);

        let prompt = build_actions_prompt(&ctx.transcript_text, &ctx.action_items);
        let raw = self.invoke(Stage::Actions, &prompt).await?;
        ctx.state = PipelineState::Done;
        Ok(raw)
    }

    async fn invoke(&self, stage: Stage, prompt: &str) -> Result<String, PipelineError> {
        info!(%stage, provider = self.provider.name(), "Invoking model");

        let request = GenerationRequest {
            instruction: stage.instruction(),
            prompt,
            params: stage.params(),
        };

        let raw = self
            .provider
            .generate(request)
            .await
            .map_err(|source| PipelineError { stage, source })?;

        debug!(%stage, chars = raw.len(), "Model returned output");
        Ok(raw)
    }
}

/// Action items named in the stage 1 output.
///
/// Anything other than a JSON object with a list or non-empty string under
/// `action_items` yields an empty list.
pub fn extract_action_items(summary_raw: &str) -> Vec<String> {
    let summary: Value = match serde_json::from_str(summary_raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Summary output is not valid JSON, continuing without action items: {}", e);
            return Vec::new();
        }
    };

    match summary.get("action_items") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
