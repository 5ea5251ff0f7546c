//! TFT Stats CLI
//!
//! Drives the core engine from a terminal:
//! - `fetch` loads the comps bundle through the shared query cache
//! - `place` runs the tooltip placement for a trigger rectangle

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tftstats_core::modules::logger::init_tracing(&cli.log_level)
        .context("Failed to initialise logging")?;

    let config = tftstats_core::modules::config::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    tracing::debug!(
        base_url = %config.client.base_url,
        stale_time_ms = config.cache.stale_time_ms,
        "configuration loaded"
    );

    match cli.command {
        Commands::Fetch { json } => commands::fetch(&config, json).await,
        Commands::Place {
            left,
            top,
            width,
            height,
            variant,
            viewport_width,
            viewport_height,
            content,
        } => commands::place(
            &config,
            tftstats_types::Rect::new(left, top, width, height),
            &variant,
            tftstats_types::Viewport::new(viewport_width, viewport_height),
            content.as_deref(),
        ),
    }
}
