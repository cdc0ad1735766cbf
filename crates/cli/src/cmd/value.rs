use anyhow::Context;
use clap::Args;
use sealchain_core::{decode_value, encode_value, EncodedValue};

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Decimal value (e.g. "99.77", "-0.5", "1.5e2")
    #[arg(allow_hyphen_values = true)]
    value: String,
    /// Rescale to exactly this many fractional digits (0-6)
    #[arg(long)]
    precision: Option<u8>,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Scaled integer
    #[arg(long, allow_hyphen_values = true)]
    value: i64,
    /// Number of fractional digits (0-6)
    #[arg(long)]
    precision: u8,
}

pub fn encode(args: &EncodeArgs) -> anyhow::Result<EncodedValue> {
    encode_value(args.value.as_str(), args.precision)
        .with_context(|| format!("cannot encode '{}'", args.value))
}

pub fn run_encode(args: EncodeArgs, pretty: bool) -> anyhow::Result<()> {
    let encoded = encode(&args)?;
    super::print_json(&encoded, pretty)
}

pub fn run_decode(args: DecodeArgs) -> anyhow::Result<()> {
    println!("{}", decode_value(args.value, args.precision)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_with_and_without_precision() {
        let args = EncodeArgs {
            value: "10.50".to_string(),
            precision: None,
        };
        let encoded = encode(&args).unwrap();
        assert_eq!(encoded.scaled.value(), 1050);
        assert_eq!(encoded.scaled.precision(), 2);

        let args = EncodeArgs {
            value: "10.5".to_string(),
            precision: Some(4),
        };
        assert_eq!(encode(&args).unwrap().scaled.value(), 105000);
    }

    #[test]
    fn test_encode_error_names_input() {
        let args = EncodeArgs {
            value: "abc".to_string(),
            precision: None,
        };
        let err = encode(&args).unwrap_err();
        assert_eq!(err.to_string(), "cannot encode 'abc'");
        assert!(matches!(
            err.downcast_ref::<sealchain_core::CoreError>(),
            Some(sealchain_core::CoreError::InvalidDecimal { .. })
        ));
    }
}
