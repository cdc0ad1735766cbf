//! Core value types for seal v1.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DOMAIN_FEEDBACK_CHAIN_V1, DOMAIN_FEEDBACK_LEAF_V1, DOMAIN_RESPONSE_CHAIN_V1,
    DOMAIN_RESPONSE_LEAF_V1, DOMAIN_REVOKE_CHAIN_V1, DOMAIN_REVOKE_LEAF_V1, DOMAIN_TAG_LEN,
    MAX_ENDPOINT_BYTES, MAX_PRECISION, MAX_SCORE, MAX_TAG_BYTES, MAX_URI_BYTES,
};
use crate::error::{CoreError, Result};

// Re-export Alloy types for convenience
pub use alloy_primitives::B256 as Bytes32;

/// Convert a raw ledger field into a 32-byte value, rejecting any other length.
///
/// # Example
///
/// ```
/// use sealchain_core::parse_bytes32;
///
/// assert!(parse_bytes32("asset", &[0x11; 32]).is_ok());
/// assert!(parse_bytes32("asset", &[0x11; 31]).is_err());
/// ```
pub fn parse_bytes32(field: &'static str, bytes: &[u8]) -> Result<Bytes32> {
    let array = <[u8; 32]>::try_from(bytes).map_err(|_| CoreError::InvalidLength {
        field,
        expected: 32,
        actual: bytes.len(),
    })?;
    Ok(Bytes32::from(array))
}

/// Fixed-point decimal: `value / 10^precision`.
///
/// Construction validates the precision; the `i64` carries the range invariant.
/// Deserialization goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScaledValue")]
pub struct ScaledValue {
    value: i64,
    precision: u8,
}

#[derive(Deserialize)]
struct RawScaledValue {
    value: i64,
    precision: u8,
}

impl TryFrom<RawScaledValue> for ScaledValue {
    type Error = CoreError;

    fn try_from(raw: RawScaledValue) -> Result<Self> {
        ScaledValue::new(raw.value, raw.precision)
    }
}

impl ScaledValue {
    /// Create a new ScaledValue, validating the precision.
    pub fn new(value: i64, precision: u8) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(CoreError::InvalidPrecision(precision));
        }
        Ok(ScaledValue { value, precision })
    }

    /// Canonical zero `(0, 0)`.
    pub const fn zero() -> Self {
        ScaledValue {
            value: 0,
            precision: 0,
        }
    }

    /// The scaled integer.
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Number of implied fractional digits.
    pub const fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::value::format_scaled(self.value, self.precision))
    }
}

/// All fields of a feedback record that are sealed into its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealInput {
    /// The reported metric.
    pub value: ScaledValue,
    /// Optional score in `0..=100`.
    #[serde(default)]
    pub score: Option<u8>,
    /// Primary tag.
    #[serde(default)]
    pub tag1: String,
    /// Secondary tag.
    #[serde(default)]
    pub tag2: String,
    /// Endpoint the feedback refers to.
    #[serde(default)]
    pub endpoint: String,
    /// URI of the off-chain feedback document.
    #[serde(default)]
    pub feedback_uri: String,
    /// Digest of the off-chain feedback document.
    #[serde(default)]
    pub file_hash: Option<Bytes32>,
}

impl SealInput {
    /// Create an input with only a value; all other fields empty/absent.
    pub fn new(value: ScaledValue) -> Self {
        SealInput {
            value,
            score: None,
            tag1: String::new(),
            tag2: String::new(),
            endpoint: String::new(),
            feedback_uri: String::new(),
            file_hash: None,
        }
    }

    /// Set the file hash from raw bytes, which must be exactly 32 bytes long.
    pub fn with_file_hash_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        self.file_hash = Some(parse_bytes32("fileHash", bytes)?);
        Ok(self)
    }

    /// Check every field against its seal v1 limit.
    ///
    /// String limits are counted in UTF-8 bytes, not characters.
    pub fn validate(&self) -> Result<()> {
        check_byte_len("tag1", &self.tag1, MAX_TAG_BYTES)?;
        check_byte_len("tag2", &self.tag2, MAX_TAG_BYTES)?;
        check_byte_len("endpoint", &self.endpoint, MAX_ENDPOINT_BYTES)?;
        check_byte_len("feedbackUri", &self.feedback_uri, MAX_URI_BYTES)?;

        if self.value.precision() > MAX_PRECISION {
            return Err(CoreError::InvalidPrecision(self.value.precision()));
        }

        if let Some(score) = self.score {
            if score > MAX_SCORE {
                return Err(CoreError::InvalidScore(score));
            }
        }

        Ok(())
    }
}

fn check_byte_len(field: &'static str, s: &str, max: usize) -> Result<()> {
    if s.len() > max {
        return Err(CoreError::FieldTooLong {
            field,
            len: s.len(),
            max,
        });
    }
    Ok(())
}

/// The three hash chains an agent account maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// New feedback records.
    Feedback,
    /// Responses appended to feedback.
    Response,
    /// Feedback revocations.
    Revoke,
}

impl ChainKind {
    /// All kinds, in account order.
    pub const ALL: [ChainKind; 3] = [ChainKind::Feedback, ChainKind::Response, ChainKind::Revoke];

    /// Domain tag for this kind's leaves.
    pub const fn leaf_domain(&self) -> &'static [u8; DOMAIN_TAG_LEN] {
        match self {
            ChainKind::Feedback => DOMAIN_FEEDBACK_LEAF_V1,
            ChainKind::Response => DOMAIN_RESPONSE_LEAF_V1,
            ChainKind::Revoke => DOMAIN_REVOKE_LEAF_V1,
        }
    }

    /// Domain tag for folding this kind's leaves into its chain.
    pub const fn chain_domain(&self) -> &'static [u8; DOMAIN_TAG_LEN] {
        match self {
            ChainKind::Feedback => DOMAIN_FEEDBACK_CHAIN_V1,
            ChainKind::Response => DOMAIN_RESPONSE_CHAIN_V1,
            ChainKind::Revoke => DOMAIN_REVOKE_CHAIN_V1,
        }
    }

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Feedback => "feedback",
            ChainKind::Response => "response",
            ChainKind::Revoke => "revoke",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
