use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use sealchain_core::{compute_seal_hash, encode_value, seal_preimage, RawValue, SealInput, B256};
use sealchain_verifier::hex0x;

#[derive(Debug, Args)]
pub struct SealArgs {
    /// Path to seal request JSON
    #[arg(long)]
    input: PathBuf,
}

/// The `value` of a seal request: a decimal string or a JSON number.
///
/// With an explicit `precision`, an integer is taken as already scaled, as in
/// [`encode_value`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RequestValue {
    Decimal(String),
    Integer(i64),
    Float(f64),
}

impl RequestValue {
    fn raw(&self) -> RawValue<'_> {
        match self {
            RequestValue::Decimal(s) => RawValue::from(s),
            RequestValue::Integer(i) => RawValue::from(*i),
            RequestValue::Float(f) => RawValue::from(*f),
        }
    }
}

impl fmt::Display for RequestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestValue::Decimal(s) => f.write_str(s),
            RequestValue::Integer(i) => write!(f, "{}", i),
            RequestValue::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A feedback record as written by an operator, value not yet scaled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SealRequest {
    pub value: RequestValue,
    #[serde(default)]
    pub precision: Option<u8>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub tag1: String,
    #[serde(default)]
    pub tag2: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub feedback_uri: String,
    #[serde(default)]
    pub file_hash: Option<B256>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealOutput {
    pub value: i64,
    pub precision: u8,
    pub normalized: String,
    pub preimage: String,
    pub seal_hash: B256,
}

pub fn seal(request: SealRequest) -> anyhow::Result<SealOutput> {
    let encoded = encode_value(request.value.raw(), request.precision)
        .with_context(|| format!("invalid value '{}'", request.value))?;

    let input = SealInput {
        value: encoded.scaled,
        score: request.score,
        tag1: request.tag1,
        tag2: request.tag2,
        endpoint: request.endpoint,
        feedback_uri: request.feedback_uri,
        file_hash: request.file_hash,
    };

    let preimage = seal_preimage(&input)?;
    let seal_hash = compute_seal_hash(&input)?;
    debug!(%seal_hash, preimage_len = preimage.len(), "Sealed feedback record");

    Ok(SealOutput {
        value: encoded.scaled.value(),
        precision: encoded.scaled.precision(),
        normalized: encoded.normalized,
        preimage: hex0x(preimage),
        seal_hash,
    })
}

pub fn run(args: SealArgs, pretty: bool) -> anyhow::Result<()> {
    let request: SealRequest = super::read_json(&args.input)?;
    super::print_json(&seal(request)?, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_request_pinned_hash() {
        let request: SealRequest = serde_json::from_str(
            r#"{"value": "99.77", "tag1": "uptime", "tag2": "day", "feedbackUri": "ipfs://QmTest123"}"#,
        )
        .unwrap();

        let output = seal(request).unwrap();
        assert_eq!(output.value, 9977);
        assert_eq!(output.precision, 2);
        assert_eq!(
            output.seal_hash,
            "0x04a564625362a832cb6504c8bbd235fb63010cf1654d202740d73adfce0e91c4"
                .parse::<B256>()
                .unwrap()
        );
        assert!(output.preimage.starts_with("0x383030345f5345414c5f56315f5f5f5f"));
    }

    #[test]
    fn test_seal_request_rejects_long_tag() {
        let request = SealRequest {
            value: RequestValue::Decimal("1".to_string()),
            precision: None,
            score: None,
            tag1: "x".repeat(33),
            tag2: String::new(),
            endpoint: String::new(),
            feedback_uri: String::new(),
            file_hash: None,
        };
        let err = seal(request).unwrap_err();
        assert!(err.to_string().contains("tag1"));
    }

    #[test]
    fn test_seal_request_numeric_value() {
        let from_number: SealRequest =
            serde_json::from_str(r#"{"value": 99.77, "tag1": "uptime"}"#).unwrap();
        assert_eq!(from_number.value, RequestValue::Float(99.77));
        let from_string: SealRequest =
            serde_json::from_str(r#"{"value": "99.77", "tag1": "uptime"}"#).unwrap();
        assert_eq!(
            seal(from_number).unwrap().seal_hash,
            seal(from_string).unwrap().seal_hash
        );

        let scaled: SealRequest =
            serde_json::from_str(r#"{"value": 9977, "precision": 2}"#).unwrap();
        assert_eq!(scaled.value, RequestValue::Integer(9977));
        let output = seal(scaled).unwrap();
        assert_eq!((output.value, output.precision), (9977, 2));
        assert_eq!(output.normalized, "99.77");
    }

    #[test]
    fn test_seal_request_error_keeps_source() {
        let request: SealRequest = serde_json::from_str(r#"{"value": "1e99"}"#).unwrap();
        let err = seal(request).unwrap_err();
        assert_eq!(err.to_string(), "invalid value '1e99'");
        assert!(err.downcast_ref::<sealchain_core::CoreError>().is_some());
    }

    #[test]
    fn test_seal_request_unknown_field() {
        let result: Result<SealRequest, _> =
            serde_json::from_str(r#"{"value": "1", "fileHashh": "0x00"}"#);
        assert!(result.is_err());
    }
}
