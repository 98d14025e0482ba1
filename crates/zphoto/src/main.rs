//! zphoto CLI - Flickr pool to Twitter bridge.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zphoto::announce;
use zphoto::shortener::ShortLinkResolver;
use zphoto::twitter::{DryRunPublisher, StatusPublisher, TwitterClient};
use zphoto::watermark::{WatermarkStore, DEFAULT_WATERMARK_FILE};
use zphoto::{BotConfig, FlickrClient, SyncBot};

/// zphoto - Post new Flickr group pool photos to Twitter.
#[derive(Parser)]
#[command(name = "zphoto")]
#[command(about = "Flickr group pool to Twitter bridge")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (JSON)
    #[arg(long, global = true, env = "ZPHOTO_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Watermark file (last processed dateadded)
    #[arg(long, global = true, env = "ZPHOTO_STATE", default_value = DEFAULT_WATERMARK_FILE)]
    state: PathBuf,

    /// Log what would be posted without posting or saving the watermark
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post new pool photos and update the profile image (default)
    Sync,

    /// Post the "Welcome to day N!" announcement
    Announce,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("zphoto=debug,info")
    } else {
        EnvFilter::new("zphoto=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = BotConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let client = config.http_client().context("Failed to build HTTP client")?;

    let publisher: Arc<dyn StatusPublisher> = if cli.dry_run {
        Arc::new(DryRunPublisher)
    } else {
        Arc::new(TwitterClient::new(client.clone(), &config))
    };

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => {
            tracing::info!(
                config = %cli.config.display(),
                state = %cli.state.display(),
                group_id = %config.flickr_group_id,
                dry_run = cli.dry_run,
                "Starting sync"
            );
            run_sync(&config, client, publisher, &cli.state, cli.dry_run).await
        }
        Commands::Announce => run_announce(publisher.as_ref()).await,
    }
}

async fn run_sync(
    config: &BotConfig,
    client: reqwest::Client,
    publisher: Arc<dyn StatusPublisher>,
    state: &Path,
    dry_run: bool,
) -> Result<()> {
    let source = Arc::new(FlickrClient::new(client.clone(), config));
    let links = ShortLinkResolver::from_config(config, client);
    let store = WatermarkStore::new(state);

    let mut bot = SyncBot::new(source, publisher, links, store);
    if dry_run {
        bot = bot.without_persistence();
    }

    let report = bot.run_cycle().await.context("Sync cycle failed")?;

    println!("\nSync Summary");
    println!("   Fetched: {}", report.fetched);
    println!("   New: {}", report.new_items);
    println!("   Published: {}", report.published);
    println!(
        "   Watermark: {} -> {}",
        report.watermark_before, report.watermark_after
    );
    println!("   Profile image updated: {}", report.profile_updated);
    if let Some(reason) = &report.degraded {
        println!("   Pool unavailable: {reason}");
    }

    Ok(())
}

async fn run_announce(publisher: &dyn StatusPublisher) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let message = announce::announcement(today);

    tracing::info!(%today, message = %message, "Posting announcement");
    publisher
        .post_status(&message)
        .await
        .context("Failed to post announcement")?;

    println!("{message}");
    Ok(())
}
