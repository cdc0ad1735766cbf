//! Per-agent integrity checks.
//!
//! An agent account records one chain state per chain kind. Given the events an
//! indexer reports for that agent, recompute all three chains and compare them with
//! the recorded states.

use serde::{Deserialize, Serialize};
use tracing::warn;

use sealchain_core::{ChainEvent, ChainKind, ChainState, B256};

use crate::error::ReplayError;
use crate::replay::{replay, Mismatch};

/// Chain states recorded on an agent account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentChainDigests {
    /// Feedback chain.
    pub feedback: ChainState,
    /// Response chain.
    pub response: ChainState,
    /// Revoke chain.
    pub revoke: ChainState,
}

impl AgentChainDigests {
    /// State of the given chain.
    pub const fn get(&self, kind: ChainKind) -> &ChainState {
        match kind {
            ChainKind::Feedback => &self.feedback,
            ChainKind::Response => &self.response,
            ChainKind::Revoke => &self.revoke,
        }
    }
}

/// Verdict for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChainVerdict {
    /// Recomputed chain equals the recorded state.
    Valid {
        /// The verified state.
        state: ChainState,
    },
    /// An event's stored checkpoint disagrees with the recomputed digest.
    Diverged {
        /// Where it diverged.
        mismatch: Mismatch,
    },
    /// Events are missing or extra.
    CountMismatch {
        /// Count recorded on the account.
        expected: u64,
        /// Count recomputed from the events.
        computed: u64,
    },
    /// Same number of events, different content.
    DigestMismatch {
        /// Digest recorded on the account.
        expected: B256,
        /// Digest recomputed from the events.
        computed: B256,
    },
}

impl ChainVerdict {
    /// Whether the chain verified.
    pub const fn is_valid(&self) -> bool {
        matches!(self, ChainVerdict::Valid { .. })
    }
}

/// Verdicts for all three chains of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentIntegrityReport {
    /// Feedback chain verdict.
    pub feedback: ChainVerdict,
    /// Response chain verdict.
    pub response: ChainVerdict,
    /// Revoke chain verdict.
    pub revoke: ChainVerdict,
}

impl AgentIntegrityReport {
    /// Verdict for the given chain.
    pub const fn get(&self, kind: ChainKind) -> &ChainVerdict {
        match kind {
            ChainKind::Feedback => &self.feedback,
            ChainKind::Response => &self.response,
            ChainKind::Revoke => &self.revoke,
        }
    }

    /// Whether all three chains verified.
    pub const fn is_valid(&self) -> bool {
        self.feedback.is_valid() && self.response.is_valid() && self.revoke.is_valid()
    }

    /// Chains that failed, in account order.
    pub fn failures(&self) -> impl Iterator<Item = (ChainKind, &ChainVerdict)> + '_ {
        ChainKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
            .filter(|(_, verdict)| !verdict.is_valid())
    }
}

/// Replay one chain from `start` and compare the result with `expected`.
///
/// Use a checkpoint as `start` (and only the events after it) for incremental checks.
pub fn verify_chain(
    events: &[ChainEvent],
    start: ChainState,
    expected: &ChainState,
) -> Result<ChainVerdict, ReplayError> {
    let result = replay(events, start)?;

    if let Some(mismatch) = result.mismatch {
        return Ok(ChainVerdict::Diverged { mismatch });
    }

    if result.count != expected.count {
        return Ok(ChainVerdict::CountMismatch {
            expected: expected.count,
            computed: result.count,
        });
    }

    if result.final_digest != expected.digest {
        return Ok(ChainVerdict::DigestMismatch {
            expected: expected.digest,
            computed: result.final_digest,
        });
    }

    Ok(ChainVerdict::Valid {
        state: result.state(),
    })
}

/// Split a mixed event list into one list per chain, keeping relative order.
pub fn partition_by_kind(events: &[ChainEvent]) -> [Vec<ChainEvent>; 3] {
    let mut chains: [Vec<ChainEvent>; 3] = Default::default();
    for event in events {
        let slot = match event.kind() {
            ChainKind::Feedback => 0,
            ChainKind::Response => 1,
            ChainKind::Revoke => 2,
        };
        chains[slot].push(event.clone());
    }
    chains
}

/// Verify all three chains of one agent from genesis.
///
/// `events` may mix kinds but must be in ledger order. Indices in the returned
/// verdicts refer to positions within each chain's own events.
pub fn verify_agent(
    events: &[ChainEvent],
    expected: &AgentChainDigests,
) -> Result<AgentIntegrityReport, ReplayError> {
    let [feedback, response, revoke] = partition_by_kind(events);

    let report = AgentIntegrityReport {
        feedback: verify_chain(&feedback, ChainState::genesis(), &expected.feedback)?,
        response: verify_chain(&response, ChainState::genesis(), &expected.response)?,
        revoke: verify_chain(&revoke, ChainState::genesis(), &expected.revoke)?,
    };

    for (kind, verdict) in report.failures() {
        warn!(chain = %kind, ?verdict, "Agent chain failed verification");
    }

    Ok(report)
}
