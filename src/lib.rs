//! Spotify Listening-History ETL Library
//!
//! This library implements a small ETL pipeline that extracts listening data
//! from the Spotify Web API, cleans and deduplicates it, and upserts it into a
//! PostgreSQL schema. The binary in `src/main.rs` exposes the pipeline as a
//! CLI so that an external workflow runner (cron, Airflow, ...) can invoke it
//! as a task.
//!
//! # Modules
//!
//! - `cli` - Command-line command implementations
//! - `config` - Configuration management and environment variables
//! - `db` - PostgreSQL connection, schema setup, and reporting queries
//! - `error` - Pipeline error classification
//! - `pipeline` - Extract, transform, and load stages plus the orchestrator
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Cleaning and parsing helpers
//!
//! # Example
//!
//! ```
//! use spotetl::{config, db, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> spotetl::error::Result<()> {
//!     config::load_env().await;
//!     let pool = db::connect().await?;
//!     pipeline::run(&pool, pipeline::RunMode::Incremental, 50).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the pipeline.
///
/// # Example
///
/// ```
/// info!("Extracting recently played tracks...");
/// info!("Fetched {} plays", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Loaded {} listening events", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. The non-zero exit is what signals
/// failure to an external scheduler, which owns retry policy.
///
/// # Example
///
/// ```
/// error!("Database unreachable: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. records dropped during cleaning or an
/// abnormal rate-limit delay, that don't require terminating the run.
///
/// # Example
///
/// ```
/// warning!("Dropped {} plays with unparseable timestamps", n);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
