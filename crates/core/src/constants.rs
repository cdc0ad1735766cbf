//! Canonical constants for seal v1.
//!
//! These constants MUST match the ledger program byte-for-byte. Changing any of them
//! is a breaking change and ships as a new version with new domain tags.

/// Width of every domain separation tag, in bytes.
pub const DOMAIN_TAG_LEN: usize = 16;

/// Domain tag prefixed to every seal preimage.
pub const DOMAIN_SEAL_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_SEAL_V1____";

/// Domain tag for feedback leaves.
pub const DOMAIN_FEEDBACK_LEAF_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_FB_LEAF_V1_";

/// Domain tag for response leaves.
pub const DOMAIN_RESPONSE_LEAF_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_RS_LEAF_V1_";

/// Domain tag for revoke leaves.
pub const DOMAIN_REVOKE_LEAF_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_RV_LEAF_V1_";

/// Domain tag for folding leaves into the feedback chain.
pub const DOMAIN_FEEDBACK_CHAIN_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_FEEDBACK_V1";

/// Domain tag for folding leaves into the response chain.
pub const DOMAIN_RESPONSE_CHAIN_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_RESPONSE_V1";

/// Domain tag for folding leaves into the revoke chain.
pub const DOMAIN_REVOKE_CHAIN_V1: &[u8; DOMAIN_TAG_LEN] = b"8004_REVOKE_V1__";

/// Maximum number of implied fractional digits in a scaled value.
pub const MAX_PRECISION: u8 = 6;

/// Maximum feedback score.
pub const MAX_SCORE: u8 = 100;

/// Maximum byte length of `tag1` and `tag2`.
pub const MAX_TAG_BYTES: usize = 32;

/// Maximum byte length of `endpoint`.
pub const MAX_ENDPOINT_BYTES: usize = 250;

/// Maximum byte length of `feedbackUri`.
pub const MAX_URI_BYTES: usize = 250;

/// Maximum number of zeros an exponent shift may pad into a decimal string.
pub const MAX_EXPONENT_SHIFT: u64 = 20;

/// Largest integer an `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
