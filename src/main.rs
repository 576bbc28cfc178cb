//! Clipstream main entry point
//!
//! Command-line interface for the clipstream metadata fetcher.

use anyhow::Context;
use clap::{Parser, Subcommand};
use clipstream::config::{load_config_with_hash, validate, Config};
use clipstream::output::{JsonSink, RecordSink};
use clipstream::scrape::{run_search, run_trending, run_user_profile};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Clipstream: social-video metadata fetcher
///
/// Drives a headless browser against a social-video platform and emits
/// normalized JSON records for search results, user profiles, and
/// trending hashtags.
#[derive(Parser, Debug)]
#[command(name = "clipstream")]
#[command(version)]
#[command(about = "Social-video metadata fetcher", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Override the configured attempt ceiling per operation
    #[arg(long, value_name = "N")]
    max_retries: Option<u32>,

    /// Write records to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search videos by keyword
    Search {
        /// Keyword to search for
        keyword: String,

        /// Maximum number of video records
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Fetch a user profile
    User {
        /// Username without the @ prefix
        username: String,
    },
    /// Fetch trending hashtags
    Trending {
        /// Maximum number of hashtag records
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    let mut sink: Box<dyn RecordSink> = match &config.output.path {
        Some(path) => Box::new(
            JsonSink::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(JsonSink::stdout()),
    };

    match cli.command {
        Command::Search { keyword, limit } => {
            tracing::info!("Searching videos for {:?} (limit {})", keyword, limit);
            let batch = run_search(&config, &keyword, limit).await?;
            tracing::info!(
                "Collected {} video records ({} dropped)",
                batch.len(),
                batch.dropped
            );
            sink.write_videos(&batch.records)?;
        }
        Command::User { username } => {
            tracing::info!("Fetching profile for @{}", username);
            let outcome = run_user_profile(&config, &username).await?;
            sink.write_profile(&outcome)?;
        }
        Command::Trending { limit } => {
            tracing::info!("Fetching trending hashtags (limit {})", limit);
            let batch = run_trending(&config, limit).await?;
            tracing::info!(
                "Collected {} hashtag records ({} dropped)",
                batch.len(),
                batch.dropped
            );
            sink.write_hashtags(&batch.records)?;
        }
    }

    Ok(())
}

/// Applies CLI flag overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.headed {
        config.session.headless = false;
    }
    if let Some(max_retries) = cli.max_retries {
        config.fetch.max_retries = max_retries;
    }
    if let Some(path) = &cli.output {
        config.output.path = Some(path.clone());
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("clipstream=info,warn"),
            1 => EnvFilter::new("clipstream=debug,info"),
            2 => EnvFilter::new("clipstream=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
