use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use tftstats_client::{ClientConfig, RemoteDataClient};
use tftstats_core::query::{QueryCache, QueryOptions};
use tftstats_core::tooltip::{compute_placement, render, TooltipBody};
use tftstats_core::view::{subscribe_game_data, GameDataView};
use tftstats_types::{AppConfig, Collection, Rect, TooltipVariant, Viewport};
use tracing::{debug, info};

pub async fn fetch(config: &AppConfig, json: bool) -> Result<()> {
    let client = RemoteDataClient::new(ClientConfig::from(&config.client))
        .context("Failed to build HTTP client")?;
    let cache = QueryCache::new(QueryOptions::from(config));

    info!("Fetching comps from {}{}", config.client.base_url, config.client.bundle_path);
    let mut subscription = subscribe_game_data(&cache, &client);
    let view = GameDataView::from_result(&subscription.settled().await);
    debug!(meta_decks = view.bundle.meta_decks.len(), is_error = view.is_error, "comps settled");

    if let Some(error) = &view.error {
        anyhow::bail!("Failed to load comps from {}: {}", client.config().base_url, error);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view.bundle)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("{}", "No meta decks published yet.".yellow());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Collection", "Entries"]);
    for collection in Collection::ALL {
        let count = view.bundle.collection(collection).len();
        let cell = if count == 0 {
            Cell::new(count).fg(Color::DarkGrey)
        } else {
            Cell::new(count).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(collection.as_str()), cell]);
    }

    println!("{table}");
    if let Some(updated) = view.data_updated_at {
        println!("\nUpdated at {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}

pub fn place(
    config: &AppConfig,
    origin: Rect,
    variant: &str,
    viewport: Viewport,
    content: Option<&str>,
) -> Result<()> {
    let variant = TooltipVariant::from_name(variant);
    let size = variant.estimated_size();
    let placement = compute_placement(&origin, size, viewport, config.tooltip.margin);
    debug!(?origin, ?viewport, ?placement, variant = variant.as_str(), "tooltip placed");

    println!(
        "{} {} ({}x{}) at x={:.1} y={:.1} {}",
        "✓".green(),
        variant.as_str().cyan(),
        size.width,
        size.height,
        placement.x,
        placement.y,
        if placement.is_below { "below" } else { "above" },
    );

    if let Some(raw) = content {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("Failed to parse --content as JSON")?;
        match render(variant, &value) {
            TooltipBody::Empty => println!("{}", "(empty)".dimmed()),
            TooltipBody::Card { title, subtitle, lines } => {
                println!("{}", title.bold());
                if let Some(subtitle) = subtitle {
                    println!("{}", subtitle.dimmed());
                }
                for line in lines {
                    println!("  {line}");
                }
            },
            TooltipBody::Raw(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        }
    }
    Ok(())
}
