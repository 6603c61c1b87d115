/// Main entry point for the habit tracker driver
///
/// This file sets up logging, parses command line arguments and runs one
/// pass over the habit store: load from the seed source, create habits, mark
/// completions, then print the snapshot and statistics as JSON on stdout.

use std::time::Duration;
use clap::Parser;
use serde_json::json;
use tracing::info;

use habit_tracker::{
    local_today, parse_date, Frequency, HabitStore, HabitTracker, SeedSource, SequentialIds,
    TrackerError,
};

/// Command line arguments for the habit tracker driver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Create a habit with this name (repeatable)
    #[arg(long = "habit", value_name = "NAME")]
    habits: Vec<String>,

    /// Frequency of the --habit entries (daily or weekly)
    #[arg(long, default_value = "daily", value_parser = Frequency::parse)]
    frequency: Frequency,

    /// Mark every created habit as completed on the reference date
    #[arg(long)]
    complete_today: bool,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    date: Option<String>,

    /// Simulated delay of the seed source in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Make the seed source fail with this message
    #[arg(long, value_name = "MESSAGE")]
    fail_load: Option<String>,

    /// Do not load from the seed source
    #[arg(long)]
    skip_load: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, stdout carries the JSON
        .init();

    let today = match &args.date {
        Some(date) => parse_date(date)?,
        None => local_today(),
    };
    info!("Reference date: {}", today);

    let mut source = SeedSource::new().with_delay(Duration::from_millis(args.delay_ms));
    if let Some(message) = &args.fail_load {
        source = source.failing(message.clone());
    }

    let tracker = HabitTracker::with_store(
        HabitStore::with_id_generator(SequentialIds::default()),
        source,
    );

    // Load first: a successful load replaces the whole collection
    if !args.skip_load {
        let task = tracker.load().await;
        task.await?;
    }

    for name in &args.habits {
        let id = tracker.create(name.as_str(), args.frequency).await?;
        if args.complete_today {
            tracker.toggle(&id, today).await?;
        }
    }

    let report = json!({
        "snapshot": tracker.snapshot().await,
        "stats": tracker.stats(today).await,
        "summaries": tracker.summaries(today).await,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Habit tracker run complete");
    Ok(())
}
