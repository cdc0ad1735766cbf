//! Chain replay.
//!
//! Folds an ordered event list into a chain state and checks every ledger
//! checkpoint along the way. Events are processed exactly in the order given.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sealchain_core::{ChainEvent, ChainState, B256};

use crate::error::ReplayError;

/// First point where the recomputed chain disagrees with a stored checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mismatch {
    /// Index of the divergent event in the replayed slice.
    pub index: usize,
    /// Digest recorded on the ledger.
    pub expected: B256,
    /// Digest recomputed from the events.
    pub computed: B256,
}

/// Outcome of one replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResult {
    /// Digest after the last trusted event.
    pub final_digest: B256,
    /// Event count after the last trusted event.
    pub count: u64,
    /// Whether every checkpoint matched.
    pub valid: bool,
    /// Set when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

impl ReplayResult {
    fn valid(state: ChainState) -> Self {
        Self {
            final_digest: state.digest,
            count: state.count,
            valid: true,
            mismatch: None,
        }
    }

    fn diverged(state: ChainState, mismatch: Mismatch) -> Self {
        Self {
            final_digest: state.digest,
            count: state.count,
            valid: false,
            mismatch: Some(mismatch),
        }
    }

    /// The resulting chain state.
    pub fn state(&self) -> ChainState {
        ChainState::new(self.final_digest, self.count)
    }
}

/// Replay `events` on top of `start`.
///
/// Every event must belong to the same chain. Replay stops at the first event whose
/// stored checkpoint differs from the recomputed digest; the result then carries
/// the state before that event.
///
/// Replaying the events after a checkpoint from that checkpoint yields the same
/// result as replaying every event from genesis.
///
/// # Errors
///
/// [`ReplayError::MixedKinds`] if the events span several chains, or
/// [`ReplayError::Event`] if an event cannot be folded.
pub fn replay(events: &[ChainEvent], start: ChainState) -> Result<ReplayResult, ReplayError> {
    let Some(kind) = events.first().map(ChainEvent::kind) else {
        return Ok(ReplayResult::valid(start));
    };

    let mut state = start;
    for (index, event) in events.iter().enumerate() {
        if event.kind() != kind {
            return Err(ReplayError::MixedKinds {
                index,
                expected: kind,
                found: event.kind(),
            });
        }

        let next = state
            .apply(event)
            .map_err(|source| ReplayError::Event { index, source })?;

        if let Some(stored) = event.stored_digest() {
            if *stored != next.digest {
                warn!(
                    chain = %kind,
                    index,
                    expected = %stored,
                    computed = %next.digest,
                    "Chain checkpoint mismatch"
                );
                return Ok(ReplayResult::diverged(
                    state,
                    Mismatch {
                        index,
                        expected: *stored,
                        computed: next.digest,
                    },
                ));
            }
        }

        state = next;
    }

    debug!(
        chain = %kind,
        events = events.len(),
        count = state.count,
        digest = %state.digest,
        "Chain replay complete"
    );

    Ok(ReplayResult::valid(state))
}

/// Replay `events` from the genesis state.
pub fn replay_from_genesis(events: &[ChainEvent]) -> Result<ReplayResult, ReplayError> {
    replay(events, ChainState::genesis())
}
