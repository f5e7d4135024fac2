use crate::chain::ChainAccess;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::Result;
use crate::router::EventRouter;
use crate::types::ChainAddress;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    config: &AppConfig,
    access: &dyn ChainAccess,
    router: &EventRouter,
    address: &str,
    from_block: Option<u64>,
    to_block: Option<u64>,
    last: Option<u64>,
    output: OutputFormat,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let address = ChainAddress::new(address)?;
    let range = super::resolve_range(config, access, from_block, to_block, last).await?;

    let events = config
        .retry
        .execute(|| router.user_token_transfers(address.clone(), range))
        .await?;

    tracing::info!("Fetched {} transfer(s) involving {}", events.len(), address);
    super::render_events(&events, output, output_file.as_deref())
}
