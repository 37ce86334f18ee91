use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use deploy_console::app_state::build_console_state;
use deploy_console::core::config::{load_env_file, ConfigOverrides, ConsoleConfig};
use deploy_console::logging::init_logging;
use deploy_console::shell;

/// Terminal console for deployments behind an orchestration API
#[derive(Debug, Parser)]
#[command(name = "deploy-console", version, about)]
struct Cli {
    /// Base URL of the orchestration API
    #[arg(long)]
    api_base: Option<String>,

    /// Namespace to operate on
    #[arg(short, long)]
    namespace: Option<String>,

    /// Directory for the rolling log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base: self.api_base.clone(),
            namespace: self.namespace.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = load_env_file(None);
    let config = ConsoleConfig::from_env()
        .with_overrides(cli.overrides())
        .validated()?;

    let _guard = init_logging(&config)?;
    if let Some(path) = env_file {
        debug!("Loaded environment overrides from {}", path.display());
    }
    info!(
        "Starting console against {} (namespace '{}')",
        config.api_base, config.namespace
    );

    let mut state = build_console_state(&config, cli.yes)?;
    shell::run(&mut state.controller, state.input.clone()).await
}
