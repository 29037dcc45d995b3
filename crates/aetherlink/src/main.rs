mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aetherlink_core::{Monitor, MonitorConfig};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "aetherlink", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let config = build_monitor_config(&cli.global)?;
            tracing::debug!(
                real = config.use_real_data,
                prefix = %config.network_prefix,
                timeout_secs = config.snapshot_timeout.as_secs(),
                "monitor configured"
            );
            let monitor = Monitor::new(config);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &monitor, &cli.global).await
        }
    }
}

/// Build a `MonitorConfig` from the config file, environment, and CLI overrides.
fn build_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(aetherlink_config::config_path);
    let mut config = aetherlink_config::load_config_from(&path)
        .map_err(|e| CliError::config(e, &path))?
        .to_monitor_config();
    if global.real {
        config.use_real_data = true;
    }
    if let Some(ref prefix) = global.prefix {
        aetherlink_config::validate_prefix(prefix)?;
        config.network_prefix.clone_from(prefix);
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        config.snapshot_timeout = Duration::from_secs(secs);
    }
    Ok(config)
}
