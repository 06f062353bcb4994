//! Insert command - create a new reading.

use anyhow::Result;
use clap::Args;
use tracing::info;

use glyco_client::{ClientError, Credentials, EntryClient, InsertRequest};
use glyco_core::Direction;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{config, Cli, OutputFormat};

/// Arguments for the insert command.
#[derive(Args)]
pub struct InsertArgs {
    /// Glucose value in mg/dL.
    pub value: u32,

    /// Reading time in Unix epoch milliseconds (defaults to now).
    #[arg(long)]
    pub date: Option<i64>,

    /// Trend direction (e.g. Flat, SingleUp, DoubleDown).
    #[arg(long)]
    pub direction: Option<String>,

    /// Source device label.
    #[arg(long)]
    pub device: Option<String>,
}

/// Runs the insert command.
pub async fn run(args: &InsertArgs, cli: &Cli) -> Result<()> {
    let direction = args.direction.as_deref().map(parse_direction).transpose()?;

    let settings = config::resolve(cli)?;
    let credentials = Credentials::new(&settings.url, &settings.api_secret)?;
    let client = EntryClient::with_timeout(credentials, settings.timeout)?;

    let mut request = InsertRequest::new(args.value);
    if let Some(date) = args.date {
        request = request.at(date);
    }
    if let Some(direction) = direction {
        request = request.with_direction(direction);
    }
    if let Some(device) = &args.device {
        request = request.with_device(device.clone());
    }

    info!(url = %settings.url, value = args.value, "Inserting entry");

    // Never retried: re-sending after an ambiguous failure could create a
    // duplicate record.
    let receipt = client.insert_entry(request).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_receipt(&receipt));
        }
        OutputFormat::Json | OutputFormat::Jsonl => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_receipt(&receipt)?);
        }
    }

    Ok(())
}

/// Parses a direction argument strictly.
///
/// `Direction::from_wire` maps anything unrecognized to `Unknown`, which
/// is right for server data but would silently drop a caller's typo here.
fn parse_direction(s: &str) -> Result<Direction, ClientError> {
    let direction = Direction::from_wire(s);
    if direction.is_known() {
        Ok(direction)
    } else {
        Err(ClientError::Validation(format!(
            "unknown direction {s:?}; expected one of DoubleUp, SingleUp, FortyFiveUp, Flat, \
             FortyFiveDown, SingleDown, DoubleDown"
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction_valid() {
        assert_eq!(parse_direction("Flat").unwrap(), Direction::Flat);
        assert_eq!(parse_direction("DoubleDown").unwrap(), Direction::DoubleDown);
    }

    #[test]
    fn test_parse_direction_invalid() {
        assert!(matches!(
            parse_direction("flat"),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            parse_direction("sideways"),
            Err(ClientError::Validation(_))
        ));
    }
}
