mod chat;
mod clock;
mod commands;
mod config;
mod error;
mod format;
mod render;
mod resolve;
mod wire;

use crate::chat::BotWorker;
use crate::commands::Bot;
use crate::config::{BotConfig, Cli};
use clap::Parser;
use log::info;
use nba_api::client::NbaApi;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();
    init_logging();

    let cli = Cli::parse();
    let config = BotConfig::from_cli(&cli)?;
    info!("Current season {}, command prefix {:?}", config.season, config.prefix);
    let bot = Bot::new(NbaApi::new(), Arc::new(config));

    if let Some(query) = &cli.query {
        for line in bot.respond(query).await {
            println!("{line}");
        }
        return Ok(());
    }

    let worker = BotWorker::new(cli, bot);
    tokio::select! {
        _ = worker.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}

/// `RUST_LOG` filtering, default `info`. Logs go to stderr so `--query`
/// output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
