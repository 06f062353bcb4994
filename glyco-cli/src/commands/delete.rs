//! Delete command - remove a reading by id.

use anyhow::Result;
use clap::Args;
use tracing::info;

use glyco_client::{Credentials, EntryClient};

use crate::output::{JsonFormatter, TextFormatter};
use crate::retry::RetryPolicy;
use crate::{config, Cli, OutputFormat};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Server-assigned entry id.
    pub id: String,
}

/// Runs the delete command.
pub async fn run(args: &DeleteArgs, cli: &Cli) -> Result<()> {
    let settings = config::resolve(cli)?;
    let credentials = Credentials::new(&settings.url, &settings.api_secret)?;
    let client = EntryClient::with_timeout(credentials, settings.timeout)?;

    info!(url = %settings.url, id = %args.id, "Deleting entry");

    let policy = RetryPolicy::new(cli.retries);
    policy.run(|| client.delete_entry(&args.id)).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_deleted(&args.id));
        }
        OutputFormat::Json | OutputFormat::Jsonl => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_deleted(&args.id)?);
        }
    }

    Ok(())
}
