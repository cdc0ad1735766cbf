//! Hashing for seal v1.
//!
//! Every digest here must match the ledger program byte-for-byte. All layouts are
//! plain concatenations, hashed with Keccak-256:
//!
//! **Seal preimage**
//!
//! | Field         | Width   | Encoding                                   |
//! |---------------|---------|--------------------------------------------|
//! | domain        | 16      | `DOMAIN_SEAL_V1`                           |
//! | value         | 8       | `i64` little-endian                        |
//! | precision     | 1       | `u8`                                       |
//! | score flag    | 1       | `1` present, `0` absent                    |
//! | score         | 1       | score, `0` when absent                     |
//! | tag1          | 2 + n   | `u16` LE byte length, then UTF-8 bytes     |
//! | tag2          | 2 + n   | same                                       |
//! | endpoint      | 2 + n   | same                                       |
//! | feedbackUri   | 2 + n   | same                                       |
//! | fileHash flag | 1       | `1` present, `0` absent                    |
//! | fileHash      | 32      | digest, 32 zero bytes when absent          |
//!
//! **Leaves** (`u64` fields little-endian)
//!
//! - feedback: `domain || asset || client || feedbackIndex || sealHash || slot`
//! - response: `domain || asset || client || feedbackIndex || responder || responseHash || feedbackHash || slot`
//! - revoke: `domain || asset || client || feedbackIndex || feedbackHash || slot`
//!
//! **Chain fold**: `prevDigest || chainDomain || leaf`

use crate::constants::{
    DOMAIN_FEEDBACK_LEAF_V1, DOMAIN_RESPONSE_LEAF_V1, DOMAIN_REVOKE_LEAF_V1, DOMAIN_SEAL_V1,
    DOMAIN_TAG_LEN,
};
use crate::error::{CoreError, Result};
use crate::types::{Bytes32, SealInput};
use alloy_primitives::{keccak256 as alloy_keccak256, B256};

/// Compute keccak256 hash of input data.
///
/// This is a re-export of Alloy's keccak256 for convenience.
///
/// # Example
///
/// ```
/// use sealchain_core::hashing::keccak256;
///
/// let data = b"hello";
/// let hash = keccak256(data);
/// ```
pub fn keccak256(data: &[u8]) -> B256 {
    alloy_keccak256(data)
}

/// Build the exact seal v1 preimage for `input`.
///
/// Validates the input first, so the length prefixes below cannot truncate.
pub fn seal_preimage(input: &SealInput) -> Result<Vec<u8>> {
    input.validate()?;

    let strings_len =
        input.tag1.len() + input.tag2.len() + input.endpoint.len() + input.feedback_uri.len();
    let mut data = Vec::with_capacity(DOMAIN_TAG_LEN + 8 + 1 + 2 + 4 * 2 + strings_len + 33);

    data.extend_from_slice(DOMAIN_SEAL_V1);
    data.extend_from_slice(&input.value.value().to_le_bytes());
    data.push(input.value.precision());

    // The flag alone distinguishes "absent" from "present and zero".
    match input.score {
        Some(score) => data.extend_from_slice(&[1, score]),
        None => data.extend_from_slice(&[0, 0]),
    }

    for (name, field) in [
        ("tag1", &input.tag1),
        ("tag2", &input.tag2),
        ("endpoint", &input.endpoint),
        ("feedbackUri", &input.feedback_uri),
    ] {
        push_len_prefixed(&mut data, name, field.as_bytes())?;
    }

    match &input.file_hash {
        Some(hash) => {
            data.push(1);
            data.extend_from_slice(hash.as_slice());
        }
        None => {
            data.push(0);
            data.extend_from_slice(&[0u8; 32]);
        }
    }

    Ok(data)
}

fn push_len_prefixed(data: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| CoreError::FieldTooLong {
        field,
        len: bytes.len(),
        max: usize::from(u16::MAX),
    })?;
    data.extend_from_slice(&len.to_le_bytes());
    data.extend_from_slice(bytes);
    Ok(())
}

/// Compute the seal hash of a feedback record.
///
/// # Example
///
/// ```
/// use alloy_primitives::b256;
/// use sealchain_core::{compute_seal_hash, encode_decimal, SealInput};
///
/// let mut input = SealInput::new(encode_decimal("99.77").unwrap());
/// input.tag1 = "uptime".to_string();
/// input.tag2 = "day".to_string();
/// input.feedback_uri = "ipfs://QmTest123".to_string();
///
/// let seal = compute_seal_hash(&input).unwrap();
/// assert_eq!(
///     seal,
///     b256!("04a564625362a832cb6504c8bbd235fb63010cf1654d202740d73adfce0e91c4")
/// );
/// ```
pub fn compute_seal_hash(input: &SealInput) -> Result<Bytes32> {
    Ok(keccak256(&seal_preimage(input)?))
}

fn expect_32<'a>(field: &'static str, bytes: &'a [u8]) -> Result<&'a [u8]> {
    if bytes.len() != 32 {
        return Err(CoreError::InvalidLength {
            field,
            expected: 32,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Compute the leaf for a new feedback record.
pub fn compute_feedback_leaf(
    asset: &[u8],
    client: &[u8],
    feedback_index: u64,
    seal_hash: &[u8],
    slot: u64,
) -> Result<Bytes32> {
    let mut data = Vec::with_capacity(DOMAIN_TAG_LEN + 32 * 3 + 8 * 2);
    data.extend_from_slice(DOMAIN_FEEDBACK_LEAF_V1);
    data.extend_from_slice(expect_32("asset", asset)?);
    data.extend_from_slice(expect_32("client", client)?);
    data.extend_from_slice(&feedback_index.to_le_bytes());
    data.extend_from_slice(expect_32("sealHash", seal_hash)?);
    data.extend_from_slice(&slot.to_le_bytes());

    Ok(keccak256(&data))
}

/// Compute the leaf for a response appended to feedback.
pub fn compute_response_leaf(
    asset: &[u8],
    client: &[u8],
    feedback_index: u64,
    responder: &[u8],
    response_hash: &[u8],
    feedback_hash: &[u8],
    slot: u64,
) -> Result<Bytes32> {
    let mut data = Vec::with_capacity(DOMAIN_TAG_LEN + 32 * 5 + 8 * 2);
    data.extend_from_slice(DOMAIN_RESPONSE_LEAF_V1);
    data.extend_from_slice(expect_32("asset", asset)?);
    data.extend_from_slice(expect_32("client", client)?);
    data.extend_from_slice(&feedback_index.to_le_bytes());
    data.extend_from_slice(expect_32("responder", responder)?);
    data.extend_from_slice(expect_32("responseHash", response_hash)?);
    data.extend_from_slice(expect_32("feedbackHash", feedback_hash)?);
    data.extend_from_slice(&slot.to_le_bytes());

    Ok(keccak256(&data))
}

/// Compute the leaf for a feedback revocation.
pub fn compute_revoke_leaf(
    asset: &[u8],
    client: &[u8],
    feedback_index: u64,
    feedback_hash: &[u8],
    slot: u64,
) -> Result<Bytes32> {
    let mut data = Vec::with_capacity(DOMAIN_TAG_LEN + 32 * 3 + 8 * 2);
    data.extend_from_slice(DOMAIN_REVOKE_LEAF_V1);
    data.extend_from_slice(expect_32("asset", asset)?);
    data.extend_from_slice(expect_32("client", client)?);
    data.extend_from_slice(&feedback_index.to_le_bytes());
    data.extend_from_slice(expect_32("feedbackHash", feedback_hash)?);
    data.extend_from_slice(&slot.to_le_bytes());

    Ok(keccak256(&data))
}

/// Fold one leaf into a chain: `keccak256(prev || domain || leaf)`.
pub fn chain_hash(prev: &Bytes32, domain: &[u8; DOMAIN_TAG_LEN], leaf: &Bytes32) -> Bytes32 {
    let mut data = Vec::with_capacity(32 + DOMAIN_TAG_LEN + 32);
    data.extend_from_slice(prev.as_slice());
    data.extend_from_slice(domain);
    data.extend_from_slice(leaf.as_slice());

    keccak256(&data)
}
