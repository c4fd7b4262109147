use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tx_analyzer::{
    connect, stringify, AnalyzerConfig, AnalyzerError, ContractDescriptor, SimulationBlock,
    TxAnalyzer,
};

/// Decode a mined transaction against known contract artifacts
#[derive(Parser, Debug)]
struct Args {
    /// Transaction hash to analyze
    tx: String,

    /// Compiler artifacts (Hardhat or Foundry JSON), in matching priority order
    #[arg(short, long = "artifact", required = true)]
    artifacts: Vec<PathBuf>,

    /// Chain id, used to pick the native token symbol
    #[arg(long, default_value_t = 1)]
    chain_id: u64,

    /// Replay failed transactions against the latest block instead of the parent block
    #[arg(long)]
    latest: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let rpc_url = std::env::var("RPC_URL").map_err(|_| AnalyzerError::WalletNotDetected)?;
    let reader = connect(&rpc_url).await?;

    let descriptors = args
        .artifacts
        .iter()
        .map(|path| {
            let artifact = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ContractDescriptor::from_artifact_json(&artifact)
                .with_context(|| format!("loading {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(count = descriptors.len(), "loaded contract artifacts");

    let mut config = AnalyzerConfig::for_chain(args.chain_id);
    if args.latest {
        config = config.with_simulation_block(SimulationBlock::Latest);
    }

    let analyzer = TxAnalyzer::with_config(reader, descriptors, config);
    let result = analyzer.analyze(&args.tx).await?;

    if let Some(reason) = result.revert_data.as_ref().and_then(|revert| revert.reason()) {
        info!(%reason, "transaction reverted");
    }
    println!("{}", stringify(&result)?);
    Ok(())
}
