//! Error types for the verifier crate.

use sealchain_core::{ChainKind, CoreError};
use thiserror::Error;

/// Caller errors while replaying a chain.
///
/// A checkpoint mismatch is not an error; it is reported in the replay result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Events from different chains were passed to one replay.
    #[error("event {index} belongs to the {found} chain, expected {expected}")]
    MixedKinds {
        /// Position of the offending event.
        index: usize,
        /// Kind of the first event.
        expected: ChainKind,
        /// Kind of the offending event.
        found: ChainKind,
    },

    /// An event could not be hashed or folded.
    #[error("event {index}: {source}")]
    Event {
        /// Position of the offending event.
        index: usize,
        /// Underlying error.
        #[source]
        source: CoreError,
    },
}
