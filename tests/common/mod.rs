#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use debrief::analysis::Stage;
use debrief::llm::{GenerationParams, GenerationRequest, LlmProvider, ModelError};

pub const SUMMARY_JSON: &str = r#"{"meeting_outcomes": "Release moves to Monday", "discuss_steps": "Risk review", "action_items": ["Alice to tag the release", "Bob to book QA"]}"#;
pub const ANALYSIS_JSON: &str = r#"{"counterpoints": ["Friday is too risky"], "proposed_ideas": ["Ship behind a flag"]}"#;
pub const ACTIONS_JSON: &str = r#"[{"description": "Tag the release", "DRI": "Alice", "C": ["Bob"], "I": [], "Importance": "H", "Deadline": ""}]"#;

/// One model call as seen by the provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub stage: Option<Stage>,
    pub instruction: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Deterministic provider answering per stage and recording every call.
#[derive(Default)]
pub struct ScriptedProvider {
    summary: Option<Result<String, String>>,
    analysis: Option<Result<String, String>>,
    actions: Option<Result<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    /// Valid JSON for every stage.
    pub fn valid() -> Self {
        Self::default()
            .respond(Stage::Summary, SUMMARY_JSON)
            .respond(Stage::Analysis, ANALYSIS_JSON)
            .respond(Stage::Actions, ACTIONS_JSON)
    }

    pub fn respond(mut self, stage: Stage, text: &str) -> Self {
        *self.slot(stage) = Some(Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, stage: Stage, message: &str) -> Self {
        *self.slot(stage) = Some(Err(message.to_string()));
        self
    }

    fn slot(&mut self, stage: Stage) -> &mut Option<Result<String, String>> {
        match stage {
            Stage::Summary => &mut self.summary,
            Stage::Analysis => &mut self.analysis,
            Stage::Actions => &mut self.actions,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, stage: Stage) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.stage == Some(stage))
            .collect()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Which stage sent a given instruction.
pub fn stage_for(instruction: &str) -> Option<Stage> {
    Stage::ALL
        .into_iter()
        .find(|stage| stage.instruction() == instruction)
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, ModelError> {
        let stage = stage_for(request.instruction);
        self.calls.lock().unwrap().push(RecordedCall {
            stage,
            instruction: request.instruction.to_string(),
            prompt: request.prompt.to_string(),
            params: request.params,
        });

        let scripted = match stage {
            Some(Stage::Summary) => self.summary.clone(),
            Some(Stage::Analysis) => self.analysis.clone(),
            Some(Stage::Actions) => self.actions.clone(),
            None => None,
        };

        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ModelError::Rejected {
                status: 503,
                message,
            }),
            None => Err(ModelError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn run_debrief(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

/// Isolated HOME/XDG directories for running the binary.
pub struct TestEnv {
    home: TempDir,
    config: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
        }
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_debrief"));
        cmd.args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("DEBRIEF_GEMINI_API_KEY")
            .env_remove("GEMINI_API_KEY")
            .env_remove("DEBRIEF_PORT");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("failed to execute debrief binary")
    }

    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, contents).expect("write input file");
        path
    }
}
