//! Standalone checker for saved review API responses.
//!
//! Runs a response file through the same validation and status detection the
//! notifier uses and prints the messages that would be sent to the chat.

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use homework_notifier::practicum::{current_date, validate_response};
use homework_notifier::tracker::{StatusChange, StatusTracker};

/// Review API response checker.
#[derive(Parser, Debug)]
#[command(name = "check_response")]
#[command(about = "Checks a saved homework review API response")]
#[command(version)]
struct Args {
    /// Path to the JSON response file to check.
    #[arg(short, long, default_value = "response.json")]
    file: String,

    /// Show every record, not only the ones producing a message.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    check_file(&args.file, args.verbose)
}

fn check_file(path: &str, verbose: bool) -> ExitCode {
    println!("Checking: {path}\n");

    let response: Value = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("✗ Failed to load response: {e}");
            return ExitCode::FAILURE;
        }
    };

    let homeworks = match validate_response(&response) {
        Ok(h) => h,
        Err(e) => {
            println!("✗ Invalid response: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut tracker = StatusTracker::new();
    let mut errors = 0;
    let mut messages = 0;

    for (i, record) in homeworks.iter().enumerate() {
        let name = record
            .get("homework_name")
            .and_then(Value::as_str)
            .unwrap_or("?");

        if verbose {
            println!("[{i}] {name}");
        }

        match tracker.parse_status(record) {
            Ok(StatusChange::Changed(message)) => {
                messages += 1;
                println!("  → {message}");
            }
            Ok(StatusChange::Unchanged) => {
                if verbose {
                    println!("  = unchanged within this response");
                }
            }
            Err(e) => {
                errors += 1;
                println!("  ✗ Error: {e}");
            }
        }
    }

    println!();

    match current_date(&response) {
        Some(date) => println!("Next cursor: {date}"),
        None => println!("Next cursor: unchanged (no current_date)"),
    }

    let total = homeworks.len();
    if errors == 0 {
        println!("✓ {total} record(s) valid, {messages} message(s) would be sent");
        ExitCode::SUCCESS
    } else {
        println!("✗ Check failed: {errors} error(s) in {total} record(s)");
        ExitCode::FAILURE
    }
}
