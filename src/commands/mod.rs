/// CLI command implementations
///
/// Each command is a thin consumer of the event router; shared block-range
/// resolution and output rendering live here.
pub mod history;
pub mod tail;
pub mod transfers;

use crate::chain::ChainAccess;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::display;
use crate::error::Result;
use crate::events::DomainEvent;
use crate::export::{self, ExportFormat};
use crate::types::BlockRange;
use std::path::Path;

/// Resolve CLI block bounds into an explicit range
///
/// Returns `None` when no bounds were given, leaving the router to its
/// default lookback window. `--last N` anchors at the current tip; an
/// explicit `--from-block` without `--to-block` runs up to the tip; a
/// `--to-block` without `--from-block` looks back the configured number of
/// blocks.
pub(crate) async fn resolve_range(
    config: &AppConfig,
    access: &dyn ChainAccess,
    from_block: Option<u64>,
    to_block: Option<u64>,
    last: Option<u64>,
) -> Result<Option<BlockRange>> {
    if from_block.is_none() && to_block.is_none() && last.is_none() {
        return Ok(None);
    }

    if let Some(count) = last {
        let tip = config
            .retry
            .execute(|| access.current_block_number())
            .await?;
        return Ok(Some(BlockRange::trailing(tip, count)));
    }

    let to = match to_block {
        Some(to) => to,
        None => {
            config
                .retry
                .execute(|| access.current_block_number())
                .await?
        }
    };
    let from = from_block.unwrap_or_else(|| to.saturating_sub(config.blockchain.lookback_blocks));
    Ok(Some(BlockRange::new(from, to)?))
}

/// Print events in the requested format, optionally also writing a file
pub(crate) fn render_events(
    events: &[DomainEvent],
    output: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    match output {
        OutputFormat::Table => display::display_events(events)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(events)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["block_number", "transaction_hash", "kind", "details"])?;
            for event in events {
                writer.write_record([
                    event.block_number.to_string(),
                    event.transaction_hash.clone(),
                    event.kind.to_string(),
                    serde_json::to_string(&event.data)?,
                ])?;
            }
            writer.flush()?;
        }
    }

    if let Some(path) = output_file {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        };
        export::export_events(events, path, format)?;
        tracing::info!("Wrote {} event(s) to {}", events.len(), path.display());
    }

    Ok(())
}
