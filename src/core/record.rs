//! Record Model
//!
//! Field values as the caller supplies them, plus the normalization and
//! length coercion every validator relies on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric input (e.g. from a number widget or JSON number)
    Number(f64),
    /// Text input
    Text(String),
    /// No value supplied (JSON `null`)
    Missing,
}

/// Field name to raw value, in insertion order
pub type DataRecord = IndexMap<String, Value>;

impl Value {
    /// Build a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Normalize a field value before validator invocation
    ///
    /// Absent and missing values become the empty string, text is trimmed,
    /// numbers pass through unchanged.
    pub fn normalize(value: Option<&Value>) -> Value {
        match value {
            None | Some(Value::Missing) => Value::Text(String::new()),
            Some(Value::Text(s)) => Value::Text(s.trim().to_string()),
            Some(Value::Number(n)) => Value::Number(*n),
        }
    }

    /// Whether the value is empty after normalization
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Number(_) => false,
        }
    }

    /// The "length" measured by `required`, `min`, `max` and `between`
    ///
    /// Text made only of ASCII digits measures as its numeric value, any
    /// other text as its character count. Numbers measure as themselves.
    pub fn length(&self) -> f64 {
        match self {
            Value::Text(s) if is_integer_literal(s) => s.parse().unwrap_or(f64::NAN),
            Value::Text(s) => s.chars().count() as f64,
            Value::Number(n) => *n,
            Value::Missing => 0.0,
        }
    }

    /// Compare against a literal taken from a rule argument
    pub fn matches_literal(&self, literal: &str) -> bool {
        match self {
            Value::Text(s) => s == literal,
            Value::Number(n) => n.to_string() == literal,
            Value::Missing => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Missing => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

fn is_integer_literal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Build a record from `(field, value)` pairs
pub fn record<I, K, V>(pairs: I) -> DataRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(Value::normalize(None), Value::text(""));
        assert_eq!(Value::normalize(Some(&Value::Missing)), Value::text(""));
        assert_eq!(Value::normalize(Some(&Value::text("  John "))), Value::text("John"));
        assert_eq!(Value::normalize(Some(&Value::Number(4.5))), Value::Number(4.5));
    }

    #[test]
    fn test_length_numeric_text() {
        assert_eq!(Value::text("25").length(), 25.0);
        assert_eq!(Value::text("007").length(), 7.0);
    }

    #[test]
    fn test_length_plain_text() {
        assert_eq!(Value::text("abcde").length(), 5.0);
        assert_eq!(Value::text("2.5").length(), 3.0);
        assert_eq!(Value::text("-3").length(), 2.0);
        assert_eq!(Value::text("").length(), 0.0);
        assert_eq!(Value::text("héllo").length(), 5.0);
    }

    #[test]
    fn test_length_number() {
        assert_eq!(Value::Number(42.0).length(), 42.0);
        assert_eq!(Value::Missing.length(), 0.0);
    }

    #[test]
    fn test_matches_literal() {
        assert!(Value::text("John").matches_literal("John"));
        assert!(!Value::text("john").matches_literal("John"));
        assert!(Value::Number(18.0).matches_literal("18"));
        assert!(!Value::Missing.matches_literal(""));
    }

    #[test]
    fn test_deserialize_json_values() {
        let data: DataRecord =
            serde_json::from_str(r#"{"name": "John", "age": 25, "bio": null}"#).unwrap();
        assert_eq!(data["name"], Value::text("John"));
        assert_eq!(data["age"], Value::Number(25.0));
        assert_eq!(data["bio"], Value::Missing);
        assert_eq!(data.keys().collect::<Vec<_>>(), ["name", "age", "bio"]);
    }
}
