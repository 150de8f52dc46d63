//! Command routing

use crate::args::{Cli, Commands};
use crate::{commands, logging};
use anyhow::Context;
use modelgate_core::config::load_config;

pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init(&config.logging);

    match cli.command {
        Commands::Query {
            question,
            provider,
            usage,
        } => commands::query::run(&config, provider.as_deref(), &question, usage).await,
        Commands::Embed { text } => commands::embed::run(&config, &text).await,
        Commands::Tools => commands::tools::run(&config).await,
        Commands::Pricing {
            provider,
            embedding,
        } => commands::pricing::run(&config, provider.as_deref(), embedding),
    }
}
