//! List command - recent readings, newest first.

use anyhow::Result;
use clap::Args;
use tracing::info;

use glyco_client::{Credentials, EntryClient};

use crate::output::{EntryOutput, JsonFormatter, TextFormatter};
use crate::retry::RetryPolicy;
use crate::{config, Cli, OutputFormat};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Number of entries to fetch.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: u32,
}

/// Runs the list command.
pub async fn run(args: &ListArgs, cli: &Cli) -> Result<()> {
    let settings = config::resolve(cli)?;
    let credentials = Credentials::new(&settings.url, &settings.api_secret)?;
    let client = EntryClient::with_timeout(credentials, settings.timeout)?;

    info!(url = %settings.url, count = args.count, "Listing entries");

    let policy = RetryPolicy::new(cli.retries);
    let batch = policy.run(|| client.list_entries(args.count)).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let output = formatter.format_entries(&batch);
            if !output.is_empty() {
                println!("{output}");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_batch(&batch)?);
        }
        OutputFormat::Jsonl => {
            for entry in &batch.entries {
                println!("{}", serde_json::to_string(&EntryOutput::from(entry))?);
            }
        }
    }

    Ok(())
}
