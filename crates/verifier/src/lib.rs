//! Sealchain offline verifier.
//!
//! Verifies:
//! - hash chains by replaying events from genesis or a checkpoint
//! - ledger checkpoints stored alongside events
//! - per-agent chain states against the events an indexer reports
//!
//! Also generates the committed seal v1 test vectors.

#![warn(missing_docs)]

pub mod error;
pub mod integrity;
pub mod replay;
pub mod vectors;

pub use error::ReplayError;
pub use integrity::{
    partition_by_kind, verify_agent, verify_chain, AgentChainDigests, AgentIntegrityReport,
    ChainVerdict,
};
pub use replay::{replay, replay_from_genesis, Mismatch, ReplayResult};
pub use vectors::{generate_vectors_v1, hex0x};
