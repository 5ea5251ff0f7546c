use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tftstats",
    about = "TFT Stats - comps data and tooltip placement from the terminal",
    version = env!("CARGO_PKG_VERSION"),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Path to a tftstats.json config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Fetch the comps bundle and summarise its collections")]
    Fetch {
        #[arg(short, long, help = "Print the normalised bundle as JSON")]
        json: bool,
    },

    #[command(about = "Compute where a tooltip would be placed for a trigger")]
    Place {
        #[arg(long, allow_hyphen_values = true, help = "Trigger left edge")]
        left: f64,

        #[arg(long, allow_hyphen_values = true, help = "Trigger top edge")]
        top: f64,

        #[arg(long, help = "Trigger width")]
        width: f64,

        #[arg(long, help = "Trigger height")]
        height: f64,

        #[arg(long, default_value = "default", help = "Tooltip variant (champion, item, trait, ...)")]
        variant: String,

        #[arg(long, default_value = "1920")]
        viewport_width: f64,

        #[arg(long, default_value = "1080")]
        viewport_height: f64,

        #[arg(long, help = "Tooltip content as JSON, rendered with the variant's template")]
        content: Option<String>,
    },
}
