//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::analysis::AnalysisPipeline;
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_provider;
use crate::server;
use crate::transcript::Transcript;
use crate::DebriefError;

/// Run the HTTP API until interrupted
pub async fn serve(settings: &Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    // Refuse to start without a usable model provider.
    let provider = build_provider(&settings).context("Cannot start the analysis server")?;
    tracing::info!(
        provider = provider.name(),
        model = %settings.llm.model,
        "Model provider configured"
    );

    server::serve(&settings, provider).await
}

/// Analyze a transcript file and print the response envelope
pub async fn analyze_file(settings: &Settings, input: &Path, compact: bool) -> Result<()> {
    // Same fail-fast credential check as `serve`.
    let provider = build_provider(settings).context("Cannot run the analysis")?;
    let pipeline = AnalysisPipeline::new(provider);

    let payload = read_input(input)?;
    let payload: Value = serde_json::from_str(&payload)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let (body, outcome) =
        match analyze_payload(&pipeline, settings.request_timeout(), &payload).await {
            Ok(body) => (body, Ok(())),
            Err(err) => {
                let message = err.to_string();
                (server::error::Error(err).body(), Err(message))
            }
        };

    let rendered = if compact {
        serde_json::to_string(&body)?
    } else {
        serde_json::to_string_pretty(&body)?
    };
    println!("{}", rendered);

    outcome.map_err(|message| anyhow::anyhow!("Analysis failed: {}", message))
}

async fn analyze_payload(
    pipeline: &AnalysisPipeline,
    request_timeout: Duration,
    payload: &Value,
) -> crate::Result<Value> {
    let transcript = match payload {
        Value::Object(map) => Transcript::from_value(map.get("transcript"))?,
        other => Transcript::from_value(Some(other))?,
    };

    let report = tokio::time::timeout(request_timeout, pipeline.analyze(&transcript))
        .await
        .map_err(|_| DebriefError::Timeout(request_timeout))??;

    Ok(json!({
        "status": "success",
        "data": report,
    }))
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transcript from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read transcript file: {}", input.display()))
}

/// Handle configuration commands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut redacted = settings.clone();
            if redacted.has_api_key() {
                redacted.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&redacted)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    config_file: String,
    provider: String,
    model: String,
    listen: String,
    checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    fn healthy(&self) -> bool {
        self.checks.iter().all(|c| c.status != "error")
    }
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("debrief doctor");
        println!("config:   {}", report.config_file);
        println!("provider: {} ({})", report.provider, report.model);
        println!("listen:   {}", report.listen);
        println!();

        for check in &report.checks {
            println!("{:<10} {:<8} {}", check.name, check.status, check.detail);
        }
    }

    if !report.healthy() {
        anyhow::bail!("One or more checks failed");
    }
    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let config_file = Settings::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("unavailable ({})", e));

    let config_exists = Settings::config_path()
        .map(|p| p.exists())
        .unwrap_or(false);

    let mut checks = vec![DoctorCheck {
        name: "config",
        status: if config_exists { "ok" } else { "info" },
        detail: if config_exists {
            "config file found".to_string()
        } else {
            "no config file, using defaults and environment".to_string()
        },
    }];

    checks.push(match build_provider(settings) {
        Ok(_) => DoctorCheck {
            name: "provider",
            status: "ok",
            detail: "model provider can be constructed".to_string(),
        },
        Err(e) => DoctorCheck {
            name: "provider",
            status: "error",
            detail: e.to_string(),
        },
    });

    checks.push(match settings.listen_addr() {
        Ok(addr) => DoctorCheck {
            name: "listen",
            status: "ok",
            detail: format!("will bind {}", addr),
        },
        Err(e) => DoctorCheck {
            name: "listen",
            status: "error",
            detail: e.to_string(),
        },
    });

    checks.push(DoctorCheck {
        name: "timeouts",
        status: if settings.llm.timeout_secs.saturating_mul(3) > settings.server.request_timeout_secs {
            "warning"
        } else {
            "ok"
        },
        detail: format!(
            "model call {}s, whole request {}s",
            settings.llm.timeout_secs, settings.server.request_timeout_secs
        ),
    });

    DoctorReport {
        config_file,
        provider: settings.llm.provider.clone(),
        model: settings.llm.model.clone(),
        listen: format!("{}:{}", settings.server.host, settings.server.port),
        checks,
    }
}
