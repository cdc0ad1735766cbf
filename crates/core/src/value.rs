//! Scaled-value codec.
//!
//! Converts human decimal values (strings, floats or pre-scaled integers) into
//! [`ScaledValue`] fixed-point integers and back. The encoded integer is what gets
//! sealed, so two inputs that mean the same number must encode identically.

use serde::Serialize;

use crate::constants::{MAX_EXPONENT_SHIFT, MAX_PRECISION, MAX_SAFE_INTEGER};
use crate::error::{CoreError, Result};
use crate::types::ScaledValue;

/// A raw value as supplied by a value source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Decimal string, optionally signed and in exponential notation.
    Decimal(&'a str),
    /// Floating-point number.
    Float(f64),
    /// Pre-scaled integer; its precision comes from the explicit precision (default 0).
    Integer(i128),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(s: &'a str) -> Self {
        RawValue::Decimal(s)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(s: &'a String) -> Self {
        RawValue::Decimal(s.as_str())
    }
}

impl From<f64> for RawValue<'_> {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(i: i64) -> Self {
        RawValue::Integer(i.into())
    }
}

impl From<u64> for RawValue<'_> {
    fn from(i: u64) -> Self {
        RawValue::Integer(i.into())
    }
}

impl From<i128> for RawValue<'_> {
    fn from(i: i128) -> Self {
        RawValue::Integer(i)
    }
}

/// Result of encoding: the scaled value plus its normalized decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedValue {
    /// The fixed-point value.
    #[serde(flatten)]
    pub scaled: ScaledValue,
    /// Decimal string without leading/trailing zeros.
    pub normalized: String,
}

/// Encode a raw value into a [`ScaledValue`].
///
/// Without an explicit precision, decimal inputs keep as many fractional digits as
/// they carry (capped at 6, excess rounded half-up) and any zero encodes as `(0, 0)`.
/// With an explicit precision, decimals are rescaled to exactly that precision and
/// integers are taken as already scaled.
///
/// # Errors
///
/// Malformed or non-finite input, a precision above 6, an unsafe integral float,
/// an excessive exponent shift, or a result outside the `i64` range.
///
/// # Example
///
/// ```
/// use sealchain_core::value::encode_value;
///
/// let encoded = encode_value("10.50", None).unwrap();
/// assert_eq!(encoded.scaled.value(), 1050);
/// assert_eq!(encoded.scaled.precision(), 2);
/// assert_eq!(encoded.normalized, "10.5");
///
/// let encoded = encode_value(1050i64, Some(2)).unwrap();
/// assert_eq!(encoded.normalized, "10.5");
/// ```
pub fn encode_value<'a>(
    input: impl Into<RawValue<'a>>,
    explicit_precision: Option<u8>,
) -> Result<EncodedValue> {
    if let Some(precision) = explicit_precision {
        if precision > MAX_PRECISION {
            return Err(CoreError::InvalidPrecision(precision));
        }
    }

    match input.into() {
        RawValue::Decimal(s) => encode_decimal_str(s, explicit_precision),
        RawValue::Float(f) => encode_float(f, explicit_precision),
        RawValue::Integer(i) => encode_integer(i, explicit_precision.unwrap_or(0)),
    }
}

/// Encode a decimal string with automatic precision.
pub fn encode_decimal(input: &str) -> Result<ScaledValue> {
    Ok(encode_value(input, None)?.scaled)
}

/// Canonical decimal form of `input`, i.e. `decode(encode(input))`.
pub fn normalize_decimal(input: &str) -> Result<String> {
    Ok(encode_value(input, None)?.normalized)
}

/// Decode a scaled integer into its decimal string.
///
/// # Example
///
/// ```
/// use sealchain_core::value::decode_value;
///
/// assert_eq!(decode_value(9977, 2).unwrap(), "99.77");
/// assert_eq!(decode_value(-1, 6).unwrap(), "-0.000001");
/// ```
pub fn decode_value(value: i64, precision: u8) -> Result<String> {
    if precision > MAX_PRECISION {
        return Err(CoreError::InvalidPrecision(precision));
    }
    Ok(format_scaled(value, precision))
}

/// Decode a scaled integer into the nearest `f64`. For display only.
pub fn decode_value_approx(value: i64, precision: u8) -> Result<f64> {
    let decimal = decode_value(value, precision)?;
    decimal.parse::<f64>().map_err(|_| CoreError::InvalidDecimal {
        input: decimal,
        reason: "not representable as a float",
    })
}

pub(crate) fn format_scaled(value: i64, precision: u8) -> String {
    let magnitude = value.unsigned_abs();
    let divisor = 10u64.pow(u32::from(precision));
    let int_part = magnitude / divisor;
    let frac_part = magnitude % divisor;

    let mut out = String::new();
    if value < 0 {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if frac_part != 0 {
        let frac = format!("{:0width$}", frac_part, width = usize::from(precision));
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    out
}

fn finish(scaled: ScaledValue) -> Result<EncodedValue> {
    Ok(EncodedValue {
        normalized: format_scaled(scaled.value(), scaled.precision()),
        scaled,
    })
}

fn encode_integer(raw: i128, precision: u8) -> Result<EncodedValue> {
    let value = i64::try_from(raw).map_err(|_| CoreError::ValueOutOfRange(raw.to_string()))?;
    finish(ScaledValue::new(value, precision)?)
}

fn encode_float(f: f64, explicit_precision: Option<u8>) -> Result<EncodedValue> {
    if !f.is_finite() {
        return Err(CoreError::InvalidDecimal {
            input: f.to_string(),
            reason: "NaN and Infinity are not allowed",
        });
    }

    let integral = f.fract() == 0.0;
    if integral && f.abs() > MAX_SAFE_INTEGER {
        return Err(CoreError::UnsafeInteger(f.to_string()));
    }

    match explicit_precision {
        Some(precision) => {
            if !integral {
                return Err(CoreError::InvalidDecimal {
                    input: f.to_string(),
                    reason: "a pre-scaled value must be an integer",
                });
            }
            // Exact: integral and within 2^53.
            encode_integer(f as i128, precision)
        }
        // Display for f64 is the shortest round-trip form and never uses exponents.
        None => encode_decimal_str(&f.to_string(), None),
    }
}

fn encode_decimal_str(input: &str, explicit_precision: Option<u8>) -> Result<EncodedValue> {
    let decimal = Decimal::parse(input)?;

    let mut precision = match explicit_precision {
        Some(p) => p,
        None => decimal.fraction_len().min(usize::from(MAX_PRECISION)) as u8,
    };

    let value = match decimal.scale(precision, input) {
        // Trailing fractional zeros carry no value; drop them before giving up.
        Err(CoreError::ValueOutOfRange(_))
            if explicit_precision.is_none()
                && decimal.significant_fraction_len() < usize::from(precision) =>
        {
            precision = decimal.significant_fraction_len() as u8;
            decimal.scale(precision, input)?
        }
        scaled => scaled?,
    };
    if value == 0 && explicit_precision.is_none() {
        return finish(ScaledValue::zero());
    }

    finish(ScaledValue::new(value, precision)?)
}

/// Plain decimal digits with the point position; exponent already applied.
struct Decimal {
    negative: bool,
    /// ASCII digits.
    digits: Vec<u8>,
    /// `digits[..point]` is the integer part.
    point: usize,
}

impl Decimal {
    fn parse(input: &str) -> Result<Self> {
        let invalid = |reason| CoreError::InvalidDecimal {
            input: input.to_string(),
            reason,
        };

        let s = input.trim();
        if s.is_empty() {
            return Err(invalid("empty input"));
        }

        let (negative, unsigned) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        if matches!(
            unsigned.to_ascii_lowercase().as_str(),
            "nan" | "inf" | "infinity"
        ) {
            return Err(invalid("NaN and Infinity are not allowed"));
        }

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
            None => (unsigned, None),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("missing digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("unexpected character"));
        }

        let mut decimal = Decimal {
            negative,
            digits: int_part.bytes().chain(frac_part.bytes()).collect(),
            point: int_part.len(),
        };

        if let Some(exponent) = exponent {
            let (exp_negative, exp_digits) = if let Some(rest) = exponent.strip_prefix('-') {
                (true, rest)
            } else {
                (false, exponent.strip_prefix('+').unwrap_or(exponent))
            };
            if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("malformed exponent"));
            }
            // Digits are validated, so parsing only fails on overflow.
            let magnitude = exp_digits.parse::<u64>().unwrap_or(u64::MAX);
            decimal.shift(input, exp_negative, magnitude)?;
        }

        Ok(decimal)
    }

    /// Move the decimal point, padding with zeros where the digits run out.
    fn shift(&mut self, input: &str, left: bool, places: u64) -> Result<()> {
        let too_large = |shift| CoreError::ExponentTooLarge {
            input: input.to_string(),
            shift,
            max: MAX_EXPONENT_SHIFT,
        };

        let point = self.point as u64;
        let len = self.digits.len() as u64;

        if left {
            if places <= point {
                self.point -= places as usize;
            } else {
                let padding = places - point;
                if padding > MAX_EXPONENT_SHIFT {
                    return Err(too_large(padding));
                }
                let mut padded = vec![b'0'; padding as usize];
                padded.append(&mut self.digits);
                self.digits = padded;
                self.point = 0;
            }
        } else {
            let new_point = point.saturating_add(places);
            if new_point <= len {
                self.point = new_point as usize;
            } else {
                let padding = new_point - len;
                if padding > MAX_EXPONENT_SHIFT {
                    return Err(too_large(padding));
                }
                self.digits.resize(self.digits.len() + padding as usize, b'0');
                self.point = self.digits.len();
            }
        }

        Ok(())
    }

    fn fraction_len(&self) -> usize {
        self.digits.len() - self.point
    }

    /// Fractional digits up to the last non-zero one.
    fn significant_fraction_len(&self) -> usize {
        let fraction = &self.digits[self.point..];
        fraction.iter().rposition(|&d| d != b'0').map_or(0, |i| i + 1)
    }

    /// Scale to `precision` fractional digits, rounding half-up on the magnitude.
    fn scale(&self, precision: u8, input: &str) -> Result<i64> {
        let out_of_range = || CoreError::ValueOutOfRange(input.trim().to_string());
        let push_digit = |acc: u128, digit: u8| {
            acc.checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(digit)))
        };

        let precision = usize::from(precision);
        let kept = self.point + self.fraction_len().min(precision);

        let mut magnitude: u128 = 0;
        for &d in &self.digits[..kept] {
            magnitude = push_digit(magnitude, d - b'0').ok_or_else(out_of_range)?;
        }
        for _ in self.fraction_len()..precision {
            magnitude = push_digit(magnitude, 0).ok_or_else(out_of_range)?;
        }
        if let Some(&next) = self.digits.get(kept) {
            if next >= b'5' {
                magnitude = magnitude.checked_add(1).ok_or_else(out_of_range)?;
            }
        }

        if magnitude > u128::from(u64::MAX) {
            return Err(out_of_range());
        }
        let signed = if self.negative {
            -(magnitude as i128)
        } else {
            magnitude as i128
        };
        i64::try_from(signed).map_err(|_| out_of_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(s: &str) -> (i64, u8) {
        let v = encode_decimal(s).unwrap();
        (v.value(), v.precision())
    }

    #[test]
    fn test_encode_basic() {
        assert_eq!(enc("99.77"), (9977, 2));
        assert_eq!(enc("10.50"), (1050, 2));
        assert_eq!(enc("150"), (150, 0));
        assert_eq!(enc("0.015"), (15, 3));
        assert_eq!(enc("-3.5"), (-35, 1));
        assert_eq!(enc("+3.5"), (35, 1));
        assert_eq!(enc("007.25"), (725, 2));
        assert_eq!(enc(".5"), (5, 1));
        assert_eq!(enc("5."), (5, 0));
        assert_eq!(enc("  42  "), (42, 0));
    }

    #[test]
    fn test_encode_canonical_zero() {
        for s in ["0", "0.0", "-0", "+0", "000", "0.000000", "-0.0000001", "0e5"] {
            assert_eq!(enc(s), (0, 0), "input {}", s);
            assert_eq!(normalize_decimal(s).unwrap(), "0");
        }
    }

    #[test]
    fn test_encode_exponent() {
        assert_eq!(encode_decimal("1.5e2").unwrap(), encode_decimal("150").unwrap());
        assert_eq!(encode_decimal("1.5e-2").unwrap(), encode_decimal("0.015").unwrap());
        assert_eq!(enc("1.5E+2"), (150, 0));
        assert_eq!(enc("-2.5e1"), (-25, 0));
        assert_eq!(enc("123e-2"), (123, 2));
        assert_eq!(enc("1e18"), (1_000_000_000_000_000_000, 0));
    }

    #[test]
    fn test_encode_exponent_bound() {
        // 20 padding zeros is the limit; the value itself is then out of range.
        assert!(matches!(
            encode_decimal("1e20"),
            Err(CoreError::ValueOutOfRange(_))
        ));
        assert!(matches!(
            encode_decimal("1e21"),
            Err(CoreError::ExponentTooLarge { shift: 21, max: 20, .. })
        ));
        assert_eq!(enc("1e-20"), (0, 0));
        assert!(matches!(
            encode_decimal("1e-22"),
            Err(CoreError::ExponentTooLarge { shift: 21, .. })
        ));
        assert!(matches!(
            encode_decimal("1e99999999999999999999999"),
            Err(CoreError::ExponentTooLarge { .. })
        ));
    }

    #[test]
    fn test_encode_rounds_half_up() {
        assert_eq!(enc("1.2345675"), (1_234_568, 6));
        assert_eq!(enc("1.2345674"), (1_234_567, 6));
        assert_eq!(enc("0.9999995"), (1_000_000, 6));
        assert_eq!(enc("-0.0000005"), (-1, 6));
        assert_eq!(enc("-1.23456749"), (-1_234_567, 6));
        assert_eq!(normalize_decimal("0.9999995").unwrap(), "1");
    }

    #[test]
    fn test_encode_rejects_malformed() {
        for s in [
            "", " ", "abc", "1.2.3", ".", "-", "+-1", "1e", "1e+", "1ee2", "0x10", "1,5", "1 2",
        ] {
            assert!(
                matches!(encode_decimal(s), Err(CoreError::InvalidDecimal { .. })),
                "expected rejection of {:?}",
                s
            );
        }
    }

    #[test]
    fn test_encode_rejects_non_finite_strings() {
        for s in ["NaN", "nan", "Infinity", "-infinity", "+INF", "inf"] {
            let err = encode_decimal(s).unwrap_err();
            assert!(err.to_string().contains("NaN and Infinity"), "{}", err);
        }
    }

    #[test]
    fn test_encode_range_boundaries() {
        assert_eq!(enc("9223372036854775807"), (i64::MAX, 0));
        assert_eq!(enc("-9223372036854775808"), (i64::MIN, 0));
        assert_eq!(enc("92233720368547.75807"), (i64::MAX, 5));

        // Zero fractions on the bounds fall back to the precision the value needs.
        assert_eq!(enc("9223372036854775807.0"), (i64::MAX, 0));
        assert_eq!(enc("-9223372036854775808.00"), (i64::MIN, 0));
        assert_eq!(enc("92233720368547.758070"), (i64::MAX, 5));
        assert_eq!(
            normalize_decimal("9223372036854775807.0").unwrap(),
            "9223372036854775807"
        );
        assert!(matches!(
            encode_decimal("9223372036854775808.0"),
            Err(CoreError::ValueOutOfRange(_))
        ));

        let err = encode_decimal("9223372036854775808").unwrap_err();
        assert_eq!(
            err,
            CoreError::ValueOutOfRange("9223372036854775808".to_string())
        );
        assert!(err.to_string().contains("9223372036854775808"));

        assert!(matches!(
            encode_decimal("-9223372036854775809"),
            Err(CoreError::ValueOutOfRange(_))
        ));
        assert!(matches!(
            encode_decimal(&"9".repeat(60)),
            Err(CoreError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_encode_explicit_precision_on_decimal() {
        let v = encode_value("99.7", Some(2)).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (9970, 2));
        assert_eq!(v.normalized, "99.7");

        let v = encode_value("1.005", Some(2)).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (101, 2));

        let v = encode_value("0", Some(3)).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (0, 3));

        assert_eq!(
            encode_value("1", Some(7)),
            Err(CoreError::InvalidPrecision(7))
        );
    }

    #[test]
    fn test_encode_integer() {
        let v = encode_value(1050i64, Some(2)).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (1050, 2));
        assert_eq!(v.normalized, "10.5");

        let v = encode_value(-7i64, None).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (-7, 0));

        assert!(encode_value(i128::from(i64::MAX), Some(6)).is_ok());
        assert!(matches!(
            encode_value(i128::from(i64::MAX) + 1, None),
            Err(CoreError::ValueOutOfRange(_))
        ));
        assert!(matches!(
            encode_value(u64::MAX, None),
            Err(CoreError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_encode_float() {
        let v = encode_value(99.77f64, None).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (9977, 2));

        let v = encode_value(0.1f64 + 0.2f64, None).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (300_000, 6));
        assert_eq!(v.normalized, "0.3");

        let v = encode_value(42.0f64, None).unwrap();
        assert_eq!((v.scaled.value(), v.scaled.precision()), (42, 0));

        let v = encode_value(-0.0f64, None).unwrap();
        assert_eq!(v.scaled, ScaledValue::zero());

        let v = encode_value(1e-7f64, None).unwrap();
        assert_eq!(v.scaled, ScaledValue::zero());

        let v = encode_value(1234.0f64, Some(3)).unwrap();
        assert_eq!(v.normalized, "1.234");
    }

    #[test]
    fn test_encode_float_rejections() {
        assert!(matches!(
            encode_value(f64::NAN, None),
            Err(CoreError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            encode_value(f64::INFINITY, None),
            Err(CoreError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            encode_value(1.5f64, Some(2)),
            Err(CoreError::InvalidDecimal { .. })
        ));

        assert!(encode_value(9_007_199_254_740_991.0f64, None).is_ok());
        assert!(matches!(
            encode_value(9_007_199_254_740_994.0f64, None),
            Err(CoreError::UnsafeInteger(_))
        ));
        assert!(matches!(
            encode_value(-1e300f64, None),
            Err(CoreError::UnsafeInteger(_))
        ));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_value(9977, 2).unwrap(), "99.77");
        assert_eq!(decode_value(1050, 2).unwrap(), "10.5");
        assert_eq!(decode_value(1_000_000, 6).unwrap(), "1");
        assert_eq!(decode_value(5, 6).unwrap(), "0.000005");
        assert_eq!(decode_value(-35, 1).unwrap(), "-3.5");
        assert_eq!(decode_value(0, 4).unwrap(), "0");
        assert_eq!(decode_value(i64::MIN, 0).unwrap(), "-9223372036854775808");
        assert_eq!(decode_value(i64::MIN, 6).unwrap(), "-9223372036854.775808");
        assert_eq!(decode_value(1, 7), Err(CoreError::InvalidPrecision(7)));
    }

    #[test]
    fn test_decode_approx() {
        assert_eq!(decode_value_approx(9977, 2).unwrap(), 99.77);
        assert_eq!(decode_value_approx(-15, 3).unwrap(), -0.015);
        assert!(decode_value_approx(1, 9).is_err());
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            ("99.77", "99.77"),
            ("10.50", "10.5"),
            ("-0.0100", "-0.01"),
            ("000123.4500", "123.45"),
            ("1.5e2", "150"),
            ("1.5e-2", "0.015"),
            ("-0", "0"),
            ("9223372036854775807", "9223372036854775807"),
        ];

        for (input, normalized) in cases {
            let encoded = encode_value(input, None).unwrap();
            let decoded =
                decode_value(encoded.scaled.value(), encoded.scaled.precision()).unwrap();
            assert_eq!(decoded, normalized, "input {}", input);
            assert_eq!(decoded, encoded.normalized);
            assert_eq!(normalize_decimal(input).unwrap(), normalized);
        }
    }

    #[test]
    fn test_encoded_value_json() {
        let encoded = encode_value("10.50", None).unwrap();
        let json = serde_json::to_value(&encoded).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 1050, "precision": 2, "normalized": "10.5"})
        );
    }
}
