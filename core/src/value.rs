//! Value kinds, the tagged value type, and raw-string coercion.
//!
//! Every option declares a [`ValueKind`]; value-consuming options carry a
//! [`ScalarKind`] that decides how captured raw strings are coerced into
//! typed [`Value`]s. Coercion is a total function per kind — there is no
//! open-ended runtime type inspection, and mismatches are reported as
//! [`CoerceError`]s.
//!
//! # Examples
//!
//! ```
//! use optline_core::{ScalarKind, Value, coerce};
//!
//! assert_eq!(coerce("42", ScalarKind::Int).unwrap(), Value::Int(42));
//! assert_eq!(coerce("TRUE", ScalarKind::Bool).unwrap(), Value::Bool(true));
//! assert!(coerce("not-a-number", ScalarKind::Float).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a single coerced value.
///
/// # Examples
///
/// ```
/// use optline_core::ScalarKind;
///
/// assert_eq!(ScalarKind::default(), ScalarKind::Str);
/// assert_eq!(ScalarKind::Int.to_string(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScalarKind {
    /// Arbitrary string (the default).
    #[default]
    Str,
    /// Boolean — accepts case-insensitive `true`/`false`/`1`/`0`.
    Bool,
    /// Signed 64-bit integer, decimal or `0x`-prefixed hex.
    Int,
    /// 64-bit floating point.
    Float,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Str => "string",
            ScalarKind::Bool => "boolean",
            ScalarKind::Int => "integer",
            ScalarKind::Float => "float",
        };
        f.write_str(name)
    }
}

/// Kind of value an option accepts.
///
/// `Flag` options never consume a value; `Scalar` options hold one value
/// (last occurrence wins when repeats are allowed); `List` options append
/// one element per occurrence.
///
/// # Examples
///
/// ```
/// use optline_core::{ScalarKind, ValueKind};
///
/// let kind = ValueKind::List(ScalarKind::Str);
/// assert!(kind.is_list());
/// assert_eq!(kind.scalar_kind(), Some(ScalarKind::Str));
/// assert!(!ValueKind::Flag.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueKind {
    /// Boolean-presence option; never consumes a following token.
    #[default]
    Flag,
    /// Single value of the given scalar kind.
    Scalar(ScalarKind),
    /// Sequence of values of the given scalar kind, one per occurrence.
    List(ScalarKind),
}

impl ValueKind {
    /// Whether this kind consumes a value token.
    pub fn takes_value(&self) -> bool {
        !matches!(self, ValueKind::Flag)
    }

    /// Whether this kind accumulates a sequence of values.
    pub fn is_list(&self) -> bool {
        matches!(self, ValueKind::List(_))
    }

    /// The element kind for value-consuming options, `None` for flags.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            ValueKind::Flag => None,
            ValueKind::Scalar(kind) | ValueKind::List(kind) => Some(*kind),
        }
    }
}

/// A coerced option value.
///
/// Closed tagged variant over the scalar kinds. Conversions back to Rust
/// types go through [`FromValue`] and are strict: an `Int` value never
/// converts to `f64`, and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl Value {
    /// The scalar kind this value belongs to.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::Str(_) => ScalarKind::Str,
            Value::Bool(_) => ScalarKind::Bool,
            Value::Int(_) => ScalarKind::Int,
            Value::Float(_) => ScalarKind::Float,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

/// Strict conversion from a [`Value`] to a concrete Rust type.
///
/// Implemented for `String`, `bool`, `i64`, and `f64`. Returns `None` when
/// the value's kind does not match the requested type — callers surface
/// that as a type-mismatch error rather than attempting a lossy cast.
pub trait FromValue: Sized {
    /// Converts the value, or `None` on a kind mismatch.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// A raw string that could not be coerced to the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{raw}' as {kind}")]
pub struct CoerceError {
    /// The raw token text.
    pub raw: String,
    /// The kind that was requested.
    pub kind: ScalarKind,
}

/// Coerces a raw string token into a typed [`Value`].
///
/// Booleans accept case-insensitive `true`/`false`/`1`/`0`. Integers accept
/// an optional sign followed by decimal digits or a `0x`/`0X` hex literal.
/// Floats accept anything `f64` parses.
///
/// # Examples
///
/// ```
/// use optline_core::{ScalarKind, Value, coerce};
///
/// assert_eq!(coerce("0x10", ScalarKind::Int).unwrap(), Value::Int(16));
/// assert_eq!(coerce("-2.5", ScalarKind::Float).unwrap(), Value::Float(-2.5));
/// assert_eq!(coerce("0", ScalarKind::Bool).unwrap(), Value::Bool(false));
/// assert_eq!(
///     coerce("anything", ScalarKind::Str).unwrap(),
///     Value::Str("anything".to_string()),
/// );
/// ```
pub fn coerce(raw: &str, kind: ScalarKind) -> Result<Value, CoerceError> {
    let err = || CoerceError {
        raw: raw.to_string(),
        kind,
    };

    match kind {
        ScalarKind::Str => Ok(Value::Str(raw.to_string())),
        ScalarKind::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(err()),
        },
        ScalarKind::Int => parse_int(raw).map(Value::Int).ok_or_else(err),
        ScalarKind::Float => raw.parse().map(Value::Float).map_err(|_| err()),
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    let unsigned = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);

    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let magnitude = i64::from_str_radix(hex, 16).ok()?;
        Some(if raw.starts_with('-') { -magnitude } else { magnitude })
    } else {
        raw.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_bool_tokens() {
        for raw in ["true", "TRUE", "True", "1"] {
            assert_eq!(coerce(raw, ScalarKind::Bool).unwrap(), Value::Bool(true));
        }
        for raw in ["false", "FALSE", "0"] {
            assert_eq!(coerce(raw, ScalarKind::Bool).unwrap(), Value::Bool(false));
        }
        assert!(coerce("yes", ScalarKind::Bool).is_err());
        assert!(coerce("", ScalarKind::Bool).is_err());
    }

    #[test]
    fn test_coerce_int_decimal_and_hex() {
        assert_eq!(coerce("42", ScalarKind::Int).unwrap(), Value::Int(42));
        assert_eq!(coerce("-7", ScalarKind::Int).unwrap(), Value::Int(-7));
        assert_eq!(coerce("+7", ScalarKind::Int).unwrap(), Value::Int(7));
        assert_eq!(coerce("0xff", ScalarKind::Int).unwrap(), Value::Int(255));
        assert_eq!(coerce("-0X10", ScalarKind::Int).unwrap(), Value::Int(-16));
        assert!(coerce("12three", ScalarKind::Int).is_err());
        assert!(coerce("0x", ScalarKind::Int).is_err());
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce("2.5", ScalarKind::Float).unwrap(), Value::Float(2.5));
        assert_eq!(coerce("1e3", ScalarKind::Float).unwrap(), Value::Float(1000.0));
        assert!(coerce("2.5x", ScalarKind::Float).is_err());
    }

    #[test]
    fn test_coerce_error_message_names_kind() {
        let err = coerce("abc", ScalarKind::Int).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse 'abc' as integer");
    }

    #[test]
    fn test_from_value_is_strict() {
        assert_eq!(i64::from_value(&Value::Int(3)), Some(3));
        assert_eq!(f64::from_value(&Value::Int(3)), None);
        assert_eq!(String::from_value(&Value::Bool(true)), None);
        assert_eq!(bool::from_value(&Value::Bool(true)), Some(true));
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::Int(16);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "16");
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
    }
}
