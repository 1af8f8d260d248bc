//! `tessera` — derive per-service passwords and codenames from an authenticator.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;
mod commands;
mod logging;

use clap::Parser;
use tessera_crypto_core::disable_core_dumps;
use tessera_engine::EngineConfig;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref());

    if let Err(e) = disable_core_dumps() {
        tracing::warn!("could not disable core dumps: {e}");
    }

    let config = cli
        .data_dir
        .clone()
        .or_else(commands::default_data_dir)
        .map(|dir| EngineConfig::load(&dir))
        .unwrap_or_default();

    match &cli.command {
        Command::Generate(args) => commands::generate(args, &config).await,
        Command::Canonicalize { service } => commands::canonicalize(service),
        Command::Demo { version } => commands::demo(*version, &config).await,
    }
}
