//! assetdesk CLI
//!
//! Browse and edit the INI and item files of an `Assets` folder.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context as _, Result};
use assetdesk_cli::config_handlers::handle_config_command;
use assetdesk_cli::{AppConfig, Cli, Command, Context, run};
use assetdesk_core::ConfigManager;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    // Config commands must work even when the config file is broken.
    let mut stdout = std::io::stdout().lock();
    let command = match args.command {
        Command::Config { action } => {
            handle_config_command(args.config.as_deref(), action, &mut stdout)?;
            return Ok(());
        }
        command => command,
    };

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let ctx = Context::new(config, args.assets, !args.no_prompt).with_config_path(args.config);
    run(&ctx, command, &mut stdout).await?;
    Ok(())
}
