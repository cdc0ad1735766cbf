//! # Sealchain Core
//!
//! Deterministic hashing primitives for an on-chain agent reputation registry.
//!
//! Every digest produced here must be bit-identical to the one computed by the ledger
//! program, so the byte layouts live in one place ([`hashing`]) and are pinned by
//! cross-language test vectors.
//!
//! ## Features
//!
//! - **Scaled values**: decimal strings/floats to fixed-point `i64` + precision and back
//! - **Seal hashing**: one Keccak-256 digest per feedback record (seal v1)
//! - **Leaves**: feedback, response and revoke records bound to actors, index and slot
//! - **Chain folding**: domain-separated running digests per chain kind

#![warn(missing_docs)]

pub mod chain;
pub mod constants;
pub mod error;
pub mod event;
pub mod hashing;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use chain::ChainState;
pub use constants::*;
pub use error::{CoreError, Result};
pub use event::{ChainEvent, FeedbackEvent, ResponseEvent, RevokeEvent};
pub use hashing::{
    chain_hash, compute_feedback_leaf, compute_response_leaf, compute_revoke_leaf,
    compute_seal_hash, keccak256, seal_preimage,
};
pub use types::*;
pub use value::{
    decode_value, decode_value_approx, encode_decimal, encode_value, normalize_decimal,
    EncodedValue, RawValue,
};

// Re-export Alloy primitives for convenience
pub use alloy_primitives::B256;
