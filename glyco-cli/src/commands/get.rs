//! Get command - fetch and display the most recent reading.

use anyhow::Result;
use tracing::info;

use glyco_client::{Credentials, EntryClient};

use crate::output::{JsonFormatter, TextFormatter};
use crate::retry::RetryPolicy;
use crate::{config, Cli, ExitCode, OutputFormat};

/// Runs the get command.
pub async fn run(cli: &Cli) -> Result<()> {
    let settings = config::resolve(cli)?;
    let credentials = Credentials::new(&settings.url, &settings.api_secret)?;
    let client = EntryClient::with_timeout(credentials, settings.timeout)?;

    info!(url = %settings.url, "Fetching latest entry");

    let policy = RetryPolicy::new(cli.retries);
    let latest = policy.run(|| client.fetch_latest()).await?;

    let Some(entry) = latest else {
        // An empty server is a valid state, reported without an error
        // message but with its own exit code for scripting.
        println!("No data available");
        std::process::exit(ExitCode::NotFound as i32);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_entry(&entry));
        }
        OutputFormat::Json | OutputFormat::Jsonl => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_entry(&entry)?);
        }
    }

    Ok(())
}
