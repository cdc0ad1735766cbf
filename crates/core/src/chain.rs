//! Running chain state.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::event::ChainEvent;
use crate::hashing::chain_hash;
use crate::types::{Bytes32, ChainKind};

/// Accumulated digest and event count of one chain.
///
/// Folding never mutates a state; it returns the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainState {
    /// Running digest.
    pub digest: Bytes32,
    /// Number of events folded so far.
    pub count: u64,
}

impl Default for ChainState {
    fn default() -> Self {
        Self::genesis()
    }
}

impl ChainState {
    /// State of a chain with no events: zero digest, zero count.
    pub const fn genesis() -> Self {
        ChainState {
            digest: Bytes32::ZERO,
            count: 0,
        }
    }

    /// State at a known checkpoint.
    pub const fn new(digest: Bytes32, count: u64) -> Self {
        ChainState { digest, count }
    }

    /// Whether this is the genesis state.
    pub fn is_genesis(&self) -> bool {
        self.count == 0 && self.digest == Bytes32::ZERO
    }

    /// Fold a precomputed leaf into the chain of the given kind.
    pub fn fold(&self, kind: ChainKind, leaf: &Bytes32) -> Result<ChainState> {
        let count = self.count.checked_add(1).ok_or(CoreError::CountOverflow)?;
        Ok(ChainState {
            digest: chain_hash(&self.digest, kind.chain_domain(), leaf),
            count,
        })
    }

    /// Compute the event's leaf and fold it into the event's chain.
    pub fn apply(&self, event: &ChainEvent) -> Result<ChainState> {
        self.fold(event.kind(), &event.leaf()?)
    }
}
