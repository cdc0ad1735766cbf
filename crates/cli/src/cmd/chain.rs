use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use sealchain_core::{ChainEvent, ChainState, B256};
use sealchain_verifier::{AgentChainDigests, AgentIntegrityReport, ReplayResult};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to a JSON array of chain events (one chain, ledger order)
    #[arg(long)]
    events: PathBuf,
    /// Checkpoint digest to resume from (bytes32 hex)
    #[arg(long, requires = "start_count")]
    start_digest: Option<String>,
    /// Event count at the checkpoint
    #[arg(long, requires = "start_digest")]
    start_count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Path to a JSON array of one agent's chain events (any kind, ledger order)
    #[arg(long)]
    events: PathBuf,
    /// Path to the agent's recorded chain states JSON
    #[arg(long)]
    expected: PathBuf,
}

fn start_state(digest: Option<&str>, count: Option<u64>) -> anyhow::Result<ChainState> {
    match (digest, count) {
        (Some(digest), Some(count)) => {
            let digest = digest
                .parse::<B256>()
                .with_context(|| format!("invalid --start-digest '{}'", digest))?;
            Ok(ChainState::new(digest, count))
        }
        (None, None) => Ok(ChainState::genesis()),
        _ => anyhow::bail!("--start-digest and --start-count must be given together"),
    }
}

pub fn replay(events: &[ChainEvent], start: ChainState) -> anyhow::Result<ReplayResult> {
    let result = sealchain_verifier::replay(events, start)?;
    info!(
        events = events.len(),
        count = result.count,
        valid = result.valid,
        "Replayed chain"
    );
    Ok(result)
}

pub fn run_replay(args: ReplayArgs, pretty: bool) -> anyhow::Result<()> {
    let events: Vec<ChainEvent> = super::read_json(&args.events)?;
    let start = start_state(args.start_digest.as_deref(), args.start_count)?;

    let result = replay(&events, start)?;
    super::print_json(&result, pretty)?;

    if let Some(mismatch) = result.mismatch {
        anyhow::bail!(
            "chain diverged at event {}: stored {}, computed {}",
            mismatch.index,
            mismatch.expected,
            mismatch.computed
        );
    }

    Ok(())
}

pub fn verify(
    events: &[ChainEvent],
    expected: &AgentChainDigests,
) -> anyhow::Result<AgentIntegrityReport> {
    Ok(sealchain_verifier::verify_agent(events, expected)?)
}

pub fn run_verify(args: VerifyArgs, pretty: bool) -> anyhow::Result<()> {
    let events: Vec<ChainEvent> = super::read_json(&args.events)?;
    let expected: AgentChainDigests = super::read_json(&args.expected)?;

    let report = verify(&events, &expected)?;
    super::print_json(&report, pretty)?;

    let failed: Vec<&str> = report.failures().map(|(kind, _)| kind.as_str()).collect();
    anyhow::ensure!(
        failed.is_empty(),
        "agent chains failed verification: {}",
        failed.join(", ")
    );

    println!("OK");
    Ok(())
}
