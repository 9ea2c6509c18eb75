use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accident_prep::PipelineConfig;

const DEFAULT_CONFIG: &str = "accident-prep.toml";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accident_prep=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = if explicit.is_some() || config_path.exists() {
        match PipelineConfig::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}: {e}", config_path.display());
                return ExitCode::FAILURE;
            }
        }
    } else {
        info!("{DEFAULT_CONFIG} not found, using default configuration");
        PipelineConfig::default()
    };

    match accident_prep::run(&config) {
        Ok(summary) => {
            info!(
                "done: {} rows read, {} rows written to {}",
                summary.rows_read,
                summary.rows_written,
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
