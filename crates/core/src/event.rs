//! Chain events as supplied by a ledger client or indexer.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hashing::{compute_feedback_leaf, compute_response_leaf, compute_revoke_leaf};
use crate::types::{Bytes32, ChainKind};

/// A new feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    /// Agent asset identifier.
    pub asset: Bytes32,
    /// Client that left the feedback.
    pub client: Bytes32,
    /// Per-client feedback index.
    pub feedback_index: u64,
    /// Seal hash of the feedback record.
    pub seal_hash: Bytes32,
    /// Ledger slot the event landed in.
    pub slot: u64,
    /// Chain digest recorded on the ledger after this event, if observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_digest: Option<Bytes32>,
}

/// A response appended to an existing feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEvent {
    /// Agent asset identifier.
    pub asset: Bytes32,
    /// Client that left the original feedback.
    pub client: Bytes32,
    /// Index of the feedback being responded to.
    pub feedback_index: u64,
    /// Account that responded.
    pub responder: Bytes32,
    /// Hash of the response document.
    pub response_hash: Bytes32,
    /// Seal hash of the feedback being responded to.
    pub feedback_hash: Bytes32,
    /// Ledger slot the event landed in.
    pub slot: u64,
    /// Chain digest recorded on the ledger after this event, if observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_digest: Option<Bytes32>,
}

/// Revocation of an existing feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeEvent {
    /// Agent asset identifier.
    pub asset: Bytes32,
    /// Client revoking its feedback.
    pub client: Bytes32,
    /// Index of the revoked feedback.
    pub feedback_index: u64,
    /// Seal hash of the revoked feedback.
    pub feedback_hash: Bytes32,
    /// Ledger slot the event landed in.
    pub slot: u64,
    /// Chain digest recorded on the ledger after this event, if observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_digest: Option<Bytes32>,
}

/// One event of any chain.
///
/// JSON form is internally tagged: `{"kind": "feedback", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChainEvent {
    /// See [`FeedbackEvent`].
    Feedback(FeedbackEvent),
    /// See [`ResponseEvent`].
    Response(ResponseEvent),
    /// See [`RevokeEvent`].
    Revoke(RevokeEvent),
}

impl ChainEvent {
    /// The chain this event belongs to.
    pub const fn kind(&self) -> ChainKind {
        match self {
            ChainEvent::Feedback(_) => ChainKind::Feedback,
            ChainEvent::Response(_) => ChainKind::Response,
            ChainEvent::Revoke(_) => ChainKind::Revoke,
        }
    }

    /// The checkpoint observed on the ledger after this event, if any.
    pub const fn stored_digest(&self) -> Option<&Bytes32> {
        match self {
            ChainEvent::Feedback(e) => e.stored_digest.as_ref(),
            ChainEvent::Response(e) => e.stored_digest.as_ref(),
            ChainEvent::Revoke(e) => e.stored_digest.as_ref(),
        }
    }

    /// Feedback index the event refers to.
    pub const fn feedback_index(&self) -> u64 {
        match self {
            ChainEvent::Feedback(e) => e.feedback_index,
            ChainEvent::Response(e) => e.feedback_index,
            ChainEvent::Revoke(e) => e.feedback_index,
        }
    }

    /// Ledger slot of the event.
    pub const fn slot(&self) -> u64 {
        match self {
            ChainEvent::Feedback(e) => e.slot,
            ChainEvent::Response(e) => e.slot,
            ChainEvent::Revoke(e) => e.slot,
        }
    }

    /// Compute this event's leaf.
    pub fn leaf(&self) -> Result<Bytes32> {
        match self {
            ChainEvent::Feedback(e) => compute_feedback_leaf(
                e.asset.as_slice(),
                e.client.as_slice(),
                e.feedback_index,
                e.seal_hash.as_slice(),
                e.slot,
            ),
            ChainEvent::Response(e) => compute_response_leaf(
                e.asset.as_slice(),
                e.client.as_slice(),
                e.feedback_index,
                e.responder.as_slice(),
                e.response_hash.as_slice(),
                e.feedback_hash.as_slice(),
                e.slot,
            ),
            ChainEvent::Revoke(e) => compute_revoke_leaf(
                e.asset.as_slice(),
                e.client.as_slice(),
                e.feedback_index,
                e.feedback_hash.as_slice(),
                e.slot,
            ),
        }
    }
}

impl From<FeedbackEvent> for ChainEvent {
    fn from(e: FeedbackEvent) -> Self {
        ChainEvent::Feedback(e)
    }
}

impl From<ResponseEvent> for ChainEvent {
    fn from(e: ResponseEvent) -> Self {
        ChainEvent::Response(e)
    }
}

impl From<RevokeEvent> for ChainEvent {
    fn from(e: RevokeEvent) -> Self {
        ChainEvent::Revoke(e)
    }
}
