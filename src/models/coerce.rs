//! Lenient field deserializers.
//!
//! Request bodies arrive either as JSON or as URL-encoded forms, where every
//! value is a string. These helpers cast incoming values to the field type the
//! way a schema-driven document mapper does, and treat `null` as "not supplied".

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::{Number, Value};

/// Reads an optional raw value, mapping `null` to `None`.
fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.filter(|v| !v.is_null()))
}

/// Casts strings, numbers and booleans to text.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match raw(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(number_text(&n))),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "Cast to string failed for value {}",
            other
        ))),
    }
}

/// Shortest decimal text for a number; whole floats have no fraction (`5.0` is `"5"`).
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64's Display drops the ".0" that serde_json prints for whole floats
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

/// Casts numbers, numeric strings and booleans to a number.
///
/// An empty string is treated as "no value".
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match raw(deserializer)? {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("Cast to Number failed for value {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| {
                D::Error::custom(format!("Cast to Number failed for value \"{}\"", s))
            }),
        Some(Value::Bool(b)) => Ok(Some(if b { 1.0 } else { 0.0 })),
        Some(other) => Err(D::Error::custom(format!(
            "Cast to Number failed for value {}",
            other
        ))),
    }
}

/// Casts booleans and their common textual/numeric spellings to a boolean.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match raw(deserializer)? {
        None => return Ok(None),
        Some(value) => value,
    };

    let parsed = match &value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) if s.is_empty() => return Ok(None),
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("Cast to Boolean failed for value {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Field {
        #[serde(default, deserialize_with = "text")]
        value: Option<String>,
    }

    fn text_of(value: Value) -> Option<String> {
        serde_json::from_value::<Field>(json!({ "value": value }))
            .unwrap()
            .value
    }

    #[test]
    fn test_text_from_whole_float_has_no_fraction() {
        assert_eq!(text_of(json!(5.0)).as_deref(), Some("5"));
        assert_eq!(text_of(json!(-2.0)).as_deref(), Some("-2"));
        assert_eq!(text_of(json!(0.0)).as_deref(), Some("0"));
    }

    #[test]
    fn test_text_from_exponent_literal() {
        let field: Field = serde_json::from_str(r#"{"value":1e3}"#).unwrap();
        assert_eq!(field.value.as_deref(), Some("1000"));
    }

    #[test]
    fn test_text_from_numbers_keeps_digits() {
        assert_eq!(text_of(json!(42)).as_deref(), Some("42"));
        assert_eq!(text_of(json!(4.5)).as_deref(), Some("4.5"));
        assert_eq!(text_of(json!(u64::MAX)).as_deref(), Some("18446744073709551615"));
    }

    #[test]
    fn test_text_from_bool_and_null() {
        assert_eq!(text_of(json!(true)).as_deref(), Some("true"));
        assert_eq!(text_of(Value::Null), None);
    }
}
