//! Homework Notifier - Main Entry Point
//!
//! Polls the homework review API every few minutes and sends status
//! changes to a Telegram chat.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use homework_notifier::config::{check_tokens, Credentials, PollSettings};
use homework_notifier::practicum::PracticumClient;
use homework_notifier::scheduler::{PollRunner, PollState};
use homework_notifier::telegram::{Notifier, TelegramBot};

/// Telegram notifier for homework review status changes.
#[derive(Parser, Debug)]
#[command(name = "homework_notifier")]
#[command(about = "Report homework review status changes to a Telegram chat")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "debug")]
    log_level: String,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Refuse to start without the required secrets
    if !check_tokens(|key| std::env::var(key).ok()) {
        return Ok(());
    }

    // Load configurations
    let credentials =
        Credentials::from_env().context("Failed to load credentials from environment")?;
    let settings = PollSettings::from_env_with_defaults();

    // Wire the API client and the Telegram transport into the runner
    let bot =
        TelegramBot::from_credentials(&credentials).context("Failed to set up Telegram bot")?;
    let client = PracticumClient::from_credentials(&credentials);
    let runner = PollRunner::new(client, Notifier::new(bot), settings);

    let mut state = PollState::starting_now();

    // Smoke-test mode: one cycle, no sleep
    if args.once {
        let outcome = runner.poll_cycle(&mut state).await;
        info!("Single poll cycle finished: {:?}", outcome);
        return Ok(());
    }

    info!("Homework notifier is running. Use Ctrl+C to stop.");

    // Poll until Ctrl+C
    tokio::select! {
        () = runner.run(state) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
