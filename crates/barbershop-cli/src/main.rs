mod content;
mod media;
mod slots;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::media::MediaCommands;

#[derive(Debug, Parser)]
#[command(name = "barbershop-cli")]
#[command(about = "Inspect barbershop site content, branches and booking slots")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a content document (hero, services or gallery), falling back to defaults
    Content {
        key: barbershop_core::ContentKey,
        /// Print the raw document instead of the defaulted record
        #[arg(long)]
        raw: bool,
    },
    /// Show bookable time slots for a branch and date
    Slots {
        /// Date as YYYY-MM-DD (defaults to today, shop time)
        #[arg(long)]
        date: Option<String>,
        /// Branch id (e.g. branch-54)
        #[arg(long)]
        branch: String,
    },
    /// List configured branches
    Branches,
    /// Media path utilities
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = barbershop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Content { key, raw }) => content::run_content(&config, key, raw).await?,
        Some(Commands::Slots { date, branch }) => {
            slots::run_slots(&config, &branch, date.as_deref()).await?;
        }
        Some(Commands::Branches) => slots::run_branches(&config)?,
        Some(Commands::Media { command }) => media::run_media(&command),
        None => println!("barbershop-cli: run with --help to list commands"),
    }

    Ok(())
}
