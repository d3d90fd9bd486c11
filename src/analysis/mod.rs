//! Meeting analysis
//!
//! Runs the three dependent model stages and turns their raw output into a
//! structured report.

mod pipeline;
mod report;

pub use pipeline::{
    extract_action_items, AnalysisPipeline, PipelineContext, PipelineError, PipelineState,
};
pub use report::{
    assemble, AnalysisReport, RawResults, ResultParsingError, StageFailure, StageOutput,
};

use serde::Serialize;
use std::fmt;

use crate::llm::prompts;
use crate::llm::GenerationParams;

/// One of the sequential analysis steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Outcome-focused summary with action items
    Summary,
    /// Counterpoints and ideas not pursued
    Analysis,
    /// Action assignments with a DRI each
    Actions,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Summary, Stage::Analysis, Stage::Actions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Analysis => "analysis",
            Self::Actions => "actions",
        }
    }

    /// Fixed role and output shape sent to the model for this stage.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Summary => prompts::SUMMARY_INSTRUCTION,
            Self::Analysis => prompts::COUNTERPOINTS_INSTRUCTION,
            Self::Actions => prompts::ACTIONS_INSTRUCTION,
        }
    }

    pub fn params(&self) -> GenerationParams {
        match self {
            Self::Summary => prompts::SUMMARY_PARAMS,
            Self::Analysis => prompts::COUNTERPOINTS_PARAMS,
            Self::Actions => prompts::ACTIONS_PARAMS,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

