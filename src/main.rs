//! Quotebot - posts a fresh quote and its image on a schedule.

mod adapters;
mod allocator;
mod bot;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod output;
mod params;
mod ports;
mod post;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::allocator::{UniqueValueAllocator, ValueRange};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::{open_store, ServiceContext};
use crate::error::BotError;
use crate::params::validate_format;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the `-v` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), BotError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(BotError::Config)?;
    tracing::debug!(path = %config_path.display(), "loaded config");

    let range = ValueRange::new(config.range.min, config.range.max)?;
    validate_format(&config.post.image_format).map_err(BotError::InvalidArgument)?;

    let replay_path = std::env::var("QUOTEBOT_REPLAY").ok().filter(|p| !p.is_empty());
    let is_recording = std::env::var("QUOTEBOT_REC").is_ok_and(|v| v == "true" || v == "1");

    let store = open_store(&config, replay_path.is_some())?;
    let mut allocator = UniqueValueAllocator::new(store, range);

    match cli.command() {
        Command::Draw { count } => {
            for number in allocator.allocate_many(count)? {
                println!("{number}");
            }
        }
        Command::Status => {
            let used = allocator.count()?;
            println!(
                "{used} of {} numbers used (range {}..={})",
                range.size(),
                range.min(),
                range.max()
            );
        }
        Command::Reset => {
            if allocator.clear()? {
                eprintln!("Cleared issued numbers");
            } else {
                eprintln!("Nothing to clear");
            }
        }
        Command::Post { dry_run } => {
            let publish = !dry_run;
            let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
                tracing::info!(cassette = %cassette_path, "replaying");
                (ServiceContext::replaying(Path::new(cassette_path), publish)?, None)
            } else if is_recording {
                tracing::info!("recording mode enabled");
                let (ctx, session) = ServiceContext::recording(&config, publish)?;
                (ctx, Some(session))
            } else {
                (ServiceContext::live(&config, publish)?, None)
            };

            let today = chrono::Local::now().date_naive();
            let outcome = bot::run_post(
                &mut allocator,
                ctx.quotes.as_ref(),
                ctx.images.as_ref(),
                ctx.publisher.as_deref(),
                &config.post,
                today,
            )
            .await;

            if let Some(left) = ctx.unreplayed().filter(|&n| n > 0) {
                tracing::warn!(left, "cassette has unreplayed interactions");
            }
            // The recording adapters hold recorder references until dropped.
            drop(ctx);

            // Finish recording even when the run failed, so failures can be replayed.
            if let Some(session) = recording_session {
                match session.finish() {
                    Ok(path) => eprintln!("Cassette saved: {}", path.display()),
                    Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
                }
            }

            let outcome = outcome?;
            match outcome.receipt {
                Some(receipt) => eprintln!(
                    "Posted: {} (quote #{}) at {}",
                    receipt.id,
                    outcome.record.number,
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                ),
                None => {
                    println!("{}", outcome.text);
                    eprintln!("Saved: {}", outcome.image_path.display());
                }
            }
        }
    }

    Ok(())
}
