//! Turning raw stage output into the structured analysis report

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::Stage;

/// Raw model text of every stage, exactly as returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResults {
    pub summary: String,
    pub analysis: String,
    pub actions: String,
}

/// A stage's output after an attempt to decode it as JSON
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    Parsed(Value),
    Unparsed { raw: String, error: String },
}

impl StageOutput {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(value) => StageOutput::Parsed(value),
            Err(e) => StageOutput::Unparsed {
                raw: raw.to_string(),
                error: e.to_string(),
            },
        }
    }
}

/// Decoded output of all three stages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: Value,
    pub analysis: Value,
    pub actions: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: String,
}

/// At least one stage returned text that is not valid JSON.
///
/// Carries all raw output so nothing the model said is lost.
#[derive(Error, Debug, Clone)]
#[error("{}", describe(.failures))]
pub struct ResultParsingError {
    pub failures: Vec<StageFailure>,
    pub raw: RawResults,
}

impl ResultParsingError {
    pub fn failed_stages(&self) -> Vec<Stage> {
        self.failures.iter().map(|f| f.stage).collect()
    }
}

fn describe(failures: &[StageFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} output is not valid JSON ({})", f.stage, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Decode each stage independently and bundle the results.
pub fn assemble(raw: RawResults) -> Result<AnalysisReport, ResultParsingError> {
    let outputs = (
        StageOutput::parse(&raw.summary),
        StageOutput::parse(&raw.analysis),
        StageOutput::parse(&raw.actions),
    );

    match outputs {
        (
            StageOutput::Parsed(summary),
            StageOutput::Parsed(analysis),
            StageOutput::Parsed(actions),
        ) => Ok(AnalysisReport {
            summary,
            analysis,
            actions,
        }),
        (summary, analysis, actions) => {
            let failures = Stage::ALL
                .into_iter()
                .zip([summary, analysis, actions])
                .filter_map(|(stage, output)| match output {
                    StageOutput::Unparsed { error, .. } => Some(StageFailure { stage, error }),
                    StageOutput::Parsed(_) => None,
                })
                .collect();

            Err(ResultParsingError { failures, raw })
        }
    }
}
