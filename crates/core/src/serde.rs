//! Serde helper functions for request deserialization.
//!
//! Costs arrive either as JSON or as HTML form submissions. Forms carry every
//! value as a string, and JSON clients send numbers both ways, so numeric
//! fields accept a number or a numeric string. Empty strings and values that
//! do not parse are treated as absent, which surfaces later as a missing
//! field instead of an opaque deserialization error.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional integer from a number or a numeric string.
///
/// Floats are accepted only when they carry no fractional part and fit in an
/// `i64`. Anything else is treated as absent rather than saturated.
pub fn deserialize_optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Int(n)) => Some(n),
        Some(NumberOrString::Float(f)) if f.fract() == 0.0 && fits_i64(f) => Some(f as i64),
        Some(NumberOrString::Float(_)) => None,
        Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

// `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
fn fits_i64(f: f64) -> bool {
    f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Deserialize an optional amount from a number or a numeric string.
pub fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Int(n)) => Some(n as f64),
        Some(NumberOrString::Float(f)) if f.is_finite() => Some(f),
        Some(NumberOrString::Float(_)) => None,
        Some(NumberOrString::Text(s)) => s.trim().parse().ok().filter(|f: &f64| f.is_finite()),
        None => None,
    })
}
