//! Error types for the core crate.

use thiserror::Error;

/// Core error type.
///
/// Every variant names the offending field or input so callers can fix it;
/// none of these are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A string field is longer than its byte limit.
    #[error("Invalid {field}: {len} bytes exceeds the maximum of {max} bytes")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Observed UTF-8 byte length.
        len: usize,
        /// Maximum allowed byte length.
        max: usize,
    },

    /// A fixed-size field has the wrong length.
    #[error("Invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// Precision outside `0..=6`.
    #[error("Invalid precision: {0} (must be between 0 and 6)")]
    InvalidPrecision(u8),

    /// Score outside `0..=100`.
    #[error("Invalid score: {0} (must be between 0 and 100)")]
    InvalidScore(u8),

    /// Malformed decimal input.
    #[error("Invalid decimal value {input:?}: {reason}")]
    InvalidDecimal {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Scaled integer outside the signed 64-bit range.
    #[error("Value {0} is out of range: scaled integer must be between -2^63 and 2^63-1")]
    ValueOutOfRange(String),

    /// Exponent would pad the decimal with too many zeros.
    #[error("Exponent in {input:?} requires {shift} padding zeros (maximum is {max})")]
    ExponentTooLarge {
        /// The rejected input.
        input: String,
        /// Number of padding digits requested.
        shift: u64,
        /// Maximum allowed padding.
        max: u64,
    },

    /// Integral float that cannot be represented exactly.
    #[error("Unsafe integer {0}: magnitude exceeds 2^53-1 and would lose precision")]
    UnsafeInteger(String),

    /// A chain count would exceed `u64::MAX`.
    #[error("Chain count overflow")]
    CountOverflow,
}

/// Result type alias for CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
