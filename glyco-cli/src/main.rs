// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! glyco - glucose readings from a Nightscout-compatible server.
//!
//! # Examples
//!
//! ```bash
//! # Latest reading
//! glyco get
//!
//! # Ten most recent readings
//! glyco list
//!
//! # Fifty readings, one JSON object per line
//! glyco list -n 50 --format jsonl
//!
//! # Insert a reading (timestamp defaults to now)
//! glyco insert 118
//!
//! # Insert a back-dated reading with a trend
//! glyco insert 95 --date 1700000000000 --direction FortyFiveDown
//!
//! # Delete a reading by id
//! glyco delete 64f81c9a8e2b4c0004a1d2e3
//! ```

mod commands;
mod config;
mod output;
mod retry;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use glyco_client::ClientError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{delete, get, insert, list};

// ============================================================================
// CLI Definition
// ============================================================================

/// glyco - CLI for Nightscout-compatible glucose servers.
#[derive(Parser)]
#[command(name = "glyco")]
#[command(about = "CLI for Nightscout-compatible glucose servers")]
#[command(long_about = r"
glyco talks to the entries API of a Nightscout-compatible server.

The server URL and API secret come from --url/--api-secret flags, the
NIGHTSCOUT_URL and NIGHTSCOUT_API_SECRET environment variables, or
~/.config/glyco/config.json, in that order.

Examples:
  glyco get                      # Latest reading
  glyco list -n 50               # 50 most recent readings
  glyco list --format jsonl      # One JSON object per line
  glyco insert 118               # Insert a reading taken now
  glyco delete <id>              # Delete a reading
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (or NIGHTSCOUT_URL / config file).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API secret (or NIGHTSCOUT_API_SECRET / config file).
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Extra attempts on transient failures (idempotent commands only).
    #[arg(long, default_value = "0", global = true)]
    pub retries: u32,

    /// Output format.
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the most recent glucose reading.
    #[command(visible_alias = "g")]
    Get,

    /// List recent readings, newest first.
    #[command(visible_alias = "l")]
    List(list::ListArgs),

    /// Insert a new reading.
    #[command(visible_alias = "i")]
    Insert(insert::InsertArgs),

    /// Delete a reading by id.
    #[command(visible_alias = "rm")]
    Delete(delete::DeleteArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
    /// One JSON object per line.
    Jsonl,
}

/// CLI exit codes, one per error category for scripting.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error (decode failures, unexpected 4xx).
    Error = 1,
    /// Missing or invalid URL/secret configuration.
    Config = 2,
    /// Invalid caller-supplied argument.
    Validation = 3,
    /// Requested resource does not exist.
    NotFound = 4,
    /// Server rejected the credentials.
    Authentication = 5,
    /// Timeout, DNS failure, connection refused.
    Network = 6,
    /// Server-side (5xx) failure.
    Server = 7,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("glyco=debug,info")
    } else {
        EnvFilter::new("glyco=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Get => get::run(&cli).await,
        Commands::List(args) => list::run(args, &cli).await,
        Commands::Insert(args) => insert::run(args, &cli).await,
        Commands::Delete(args) => delete::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(exit_code_for(&e) as i32);
    }

    Ok(())
}

/// Maps an error to its exit code category.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::Config(_)) => ExitCode::Config,
        Some(ClientError::Validation(_)) => ExitCode::Validation,
        Some(ClientError::NotFound(_)) => ExitCode::NotFound,
        Some(ClientError::Authentication { .. }) => ExitCode::Authentication,
        Some(ClientError::Transport(_)) => ExitCode::Network,
        Some(ClientError::Server { .. }) => ExitCode::Server,
        _ => ExitCode::Error,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code_for(error: ClientError) -> i32 {
        exit_code_for(&anyhow::Error::from(error)) as i32
    }

    #[test]
    fn test_exit_code_per_category() {
        assert_eq!(code_for(ClientError::Config("x".to_string())), 2);
        assert_eq!(code_for(ClientError::Validation("x".to_string())), 3);
        assert_eq!(code_for(ClientError::NotFound("x".to_string())), 4);
        assert_eq!(code_for(ClientError::Authentication { status: 401 }), 5);
        assert_eq!(code_for(ClientError::Server { status: 500 }), 7);
    }

    #[test]
    fn test_exit_code_generic_fallback() {
        assert_eq!(code_for(ClientError::Decode("x".to_string())), 1);
        assert_eq!(
            code_for(ClientError::Api {
                status: 400,
                body: String::new()
            }),
            1
        );
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")) as i32, 1);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
