use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    blockchain::BlockchainClient,
    chain::ChainAccess,
    commands,
    config::AppConfig,
    contracts::ContractCatalog,
    events::EventKind,
    router::EventRouter,
};

/// GridMesh Events Tool
///
/// Subscribe to and query contract events of the GridMesh energy network
#[derive(Parser, Debug)]
#[command(name = "gridmesh-events")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (YAML, TOML or JSON)
    #[arg(long, env = "GRIDMESH_CONFIG")]
    pub config: Option<PathBuf>,

    /// RPC endpoint URL (overrides the configured one)
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display decoded event history for one concern
    History {
        /// Which events to query
        concern: Concern,

        /// Start block number
        #[arg(long)]
        from_block: Option<u64>,

        /// End block number (defaults to latest)
        #[arg(long)]
        to_block: Option<u64>,

        /// Look back this many blocks from the latest instead of giving
        /// explicit bounds
        #[arg(long, conflicts_with_all = ["from_block", "to_block"])]
        last: Option<u64>,

        /// Output format
        #[arg(long, default_value = "table")]
        output: OutputFormat,

        /// Also write the events to this file (.csv or .json)
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Display GRID token transfers involving an address
    Transfers {
        /// Address to match as sender or recipient
        address: String,

        /// Start block number
        #[arg(long)]
        from_block: Option<u64>,

        /// End block number (defaults to latest)
        #[arg(long)]
        to_block: Option<u64>,

        /// Look back this many blocks from the latest
        #[arg(long, conflicts_with_all = ["from_block", "to_block"])]
        last: Option<u64>,

        /// Output format
        #[arg(long, default_value = "table")]
        output: OutputFormat,

        /// Also write the events to this file (.csv or .json)
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Follow one concern live, printing events as they arrive
    Tail {
        /// Which events to follow
        concern: Concern,

        /// Poll interval in seconds (overrides the configured one)
        #[arg(long)]
        poll_interval: Option<u64>,
    },

    /// Print the current block number
    CurrentBlock,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Concern {
    NodeRegistrations,
    EnergyTrades,
    AssetMints,
    Proposals,
    TokenTransfers,
}

impl Concern {
    pub fn kind(&self) -> EventKind {
        match self {
            Concern::NodeRegistrations => EventKind::NodeRegistered,
            Concern::EnergyTrades => EventKind::EnergyPurchased,
            Concern::AssetMints => EventKind::AssetMinted,
            Concern::Proposals => EventKind::ProposalCreated,
            Concern::TokenTransfers => EventKind::TokenTransferred,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from_file(path)?,
            None => AppConfig::load()?,
        };

        if let Some(url) = self.rpc_url {
            config.rpc.url = url;
        }
        if let Commands::Tail {
            poll_interval: Some(seconds),
            ..
        } = &self.command
        {
            config.blockchain.poll_interval_seconds = *seconds;
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let catalog = ContractCatalog::from_config(&config)?;
        let client = BlockchainClient::new(
            &config.rpc.url,
            Duration::from_secs(config.blockchain.poll_interval_seconds),
        )?;
        let access: Arc<dyn ChainAccess> = Arc::new(client);
        let router = EventRouter::new(Arc::clone(&access), catalog);

        match self.command {
            Commands::History {
                concern,
                from_block,
                to_block,
                last,
                output,
                output_file,
            } => {
                commands::history::execute(
                    &config,
                    access.as_ref(),
                    &router,
                    concern.kind(),
                    from_block,
                    to_block,
                    last,
                    output,
                    output_file,
                )
                .await?
            }

            Commands::Transfers {
                address,
                from_block,
                to_block,
                last,
                output,
                output_file,
            } => {
                commands::transfers::execute(
                    &config,
                    access.as_ref(),
                    &router,
                    &address,
                    from_block,
                    to_block,
                    last,
                    output,
                    output_file,
                )
                .await?
            }

            Commands::Tail { concern, .. } => {
                commands::tail::execute(&router, concern.kind()).await?
            }

            Commands::CurrentBlock => {
                let tip = config
                    .retry
                    .execute(|| access.current_block_number())
                    .await?;
                println!("Current block: {tip}");
            }
        }

        Ok(())
    }
}
