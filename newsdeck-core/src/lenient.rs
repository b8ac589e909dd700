//! Field deserializers that accept whatever JSON type shows up.
//!
//! A numeric field holding `null`, a string or an object yields `None`
//! instead of an error, so one bad value never discards the rest of the
//! record. Numeric strings such as `"25"` are read as numbers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The integer value of a number or numeric string. Fractions truncate.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer))
}

fn integer(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                return Some(v);
            }
            n.as_f64()?
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    float.is_finite().then_some(float as i64)
}

pub(crate) fn i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.unwrap_or(0))
}

/// Negative and unreadable values become `None`.
pub(crate) fn optional_non_negative_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .filter(|v| *v >= 0)
        .map(|v| v as u64))
}

/// Zero, negative and unreadable values become `None`.
pub(crate) fn optional_positive_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.filter(|v| *v > 0))
}

pub(crate) fn optional_positive_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_positive_i64(deserializer)?.map(|v| v as usize))
}

/// Anything but a string reads as the empty string.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(s),
        _ => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_reads_numbers_and_numeric_strings() {
        assert_eq!(integer(&json!(12)), Some(12));
        assert_eq!(integer(&json!(-3)), Some(-3));
        assert_eq!(integer(&json!(4.9)), Some(4));
        assert_eq!(integer(&json!(" 25 ")), Some(25));
        assert_eq!(integer(&json!("lots")), None);
        assert_eq!(integer(&json!(null)), None);
        assert_eq!(integer(&json!(true)), None);
        assert_eq!(integer(&json!([1])), None);
    }
}
