//! debrief - Meeting transcript analysis
//!
//! Entry point for the debrief CLI and HTTP server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use debrief::cli::{Cli, Commands};
use debrief::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            debrief::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;
            init_logging(&settings, cli.verbose);

            // Execute command
            match command {
                Commands::Serve { host, port } => {
                    debrief::cli::commands::serve(&settings, host, port).await?;
                }
                Commands::Analyze { input, compact } => {
                    debrief::cli::commands::analyze_file(&settings, &input, compact).await?;
                }
                Commands::Doctor { json } => {
                    debrief::cli::commands::run_doctor(&settings, json).await?;
                }
                Commands::Config(config_cmd) => {
                    debrief::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` wins over the configured level.
fn init_logging(settings: &Settings, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
