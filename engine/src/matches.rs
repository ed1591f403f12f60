//! The result store: typed, read-only access to one parse's matches.

use std::collections::HashMap;

use optline_core::{FromValue, Schema, Value, ValueKind};
use thiserror::Error;

/// Errors raised by typed lookups on a [`Matches`].
///
/// Unlike parse errors these are local and recoverable — a caller can fall
/// back to its own default on [`OptionNotPresent`](AccessError::OptionNotPresent).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The option never matched and declares no default.
    #[error("option '{0}' was not supplied and has no default")]
    OptionNotPresent(String),
    /// The requested Rust type does not match the declared value kind.
    #[error("requested type does not match the declared kind of option '{0}'")]
    TypeMismatch(String),
}

/// Accumulated values and occurrence count for one matched option.
///
/// Created lazily on first match. The count increments on every match,
/// including flags, which carry no value.
#[derive(Debug, Clone, Default)]
pub struct ParsedOption {
    values: Vec<Value>,
    count: usize,
}

impl ParsedOption {
    /// Number of times the option matched.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Coerced values in match order (empty for flags).
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn record_flag(&mut self) {
        self.count += 1;
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
        self.count += 1;
    }

    pub(crate) fn replace_last(&mut self, value: Value) {
        self.values.pop();
        self.values.push(value);
        self.count += 1;
    }
}

/// Conversion from a matched option's value sequence to a Rust type.
///
/// Scalars take the last value; `Vec<T>` takes the full match-ordered
/// sequence. `matches_kind` is the static gate behind
/// [`AccessError::TypeMismatch`]: a type only converts from options whose
/// declared kind it represents.
pub trait FromMatch: Sized {
    /// Whether this type represents the declared kind.
    fn matches_kind(kind: ValueKind) -> bool;
    /// Converts the stored values.
    fn from_values(values: &[Value]) -> Option<Self>;
}

macro_rules! scalar_from_match {
    ($ty:ty, $kind:path) => {
        impl FromMatch for $ty {
            fn matches_kind(kind: ValueKind) -> bool {
                kind == ValueKind::Scalar($kind)
            }

            fn from_values(values: &[Value]) -> Option<Self> {
                values.last().and_then(<$ty>::from_value)
            }
        }
    };
}

scalar_from_match!(String, optline_core::ScalarKind::Str);
scalar_from_match!(bool, optline_core::ScalarKind::Bool);
scalar_from_match!(i64, optline_core::ScalarKind::Int);
scalar_from_match!(f64, optline_core::ScalarKind::Float);

impl<T: FromMatch + FromValue> FromMatch for Vec<T> {
    fn matches_kind(kind: ValueKind) -> bool {
        match kind {
            ValueKind::List(element) => T::matches_kind(ValueKind::Scalar(element)),
            _ => false,
        }
    }

    fn from_values(values: &[Value]) -> Option<Self> {
        values.iter().map(T::from_value).collect()
    }
}

/// Typed lookup structure returned by a successful parse.
///
/// Borrows the schema it was parsed against (defaults and kind checks are
/// resolved at access time) and owns the matched values plus the leftover
/// tokens. Consumed by the caller after `parse` returns; a new parse builds
/// a new store.
#[derive(Debug, Clone)]
pub struct Matches<'s> {
    schema: &'s Schema,
    matched: HashMap<String, ParsedOption>,
    leftovers: Vec<String>,
}

impl<'s> Matches<'s> {
    pub(crate) fn new(
        schema: &'s Schema,
        matched: HashMap<String, ParsedOption>,
        leftovers: Vec<String>,
    ) -> Self {
        Self {
            schema,
            matched,
            leftovers,
        }
    }

    /// Occurrence count for an option; 0 if it never matched (including
    /// names that were never declared).
    pub fn count(&self, name: &str) -> usize {
        self.matched.get(name).map(ParsedOption::count).unwrap_or(0)
    }

    /// Whether the option matched at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Coerced values for an option in match order; empty if it never
    /// matched or is a flag.
    pub fn values(&self, name: &str) -> &[Value] {
        self.matched
            .get(name)
            .map(ParsedOption::values)
            .unwrap_or(&[])
    }

    /// Typed lookup.
    ///
    /// Scalar types return the last matched value; `Vec<T>` returns the
    /// full sequence. When the option never matched, a declared default
    /// satisfies scalar lookups.
    ///
    /// # Errors
    ///
    /// [`AccessError::OptionNotPresent`] when the count is 0 and no default
    /// exists; [`AccessError::TypeMismatch`] when `T` does not match the
    /// declared kind (any typed lookup on a flag mismatches — flags are
    /// queried via [`count`](Matches::count)).
    pub fn get<T: FromMatch>(&self, name: &str) -> Result<T, AccessError> {
        let mismatch = || AccessError::TypeMismatch(name.to_string());
        let absent = || AccessError::OptionNotPresent(name.to_string());

        let Some(spec) = self.schema.get(name) else {
            return Err(absent());
        };
        if !T::matches_kind(spec.kind) {
            return Err(mismatch());
        }

        let values = self.values(name);
        if values.is_empty() {
            if let Some(default) = &spec.default {
                return T::from_values(std::slice::from_ref(default)).ok_or_else(mismatch);
            }
            return Err(absent());
        }
        T::from_values(values).ok_or_else(mismatch)
    }

    /// Tokens consumed by neither option matching nor positional binding,
    /// in original argv order.
    pub fn leftovers(&self) -> &[String] {
        &self.leftovers
    }

    /// The schema this store was parsed against.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optline_core::{OptionSpec, ScalarKind};

    fn schema_with(specs: Vec<OptionSpec>) -> Schema {
        let mut schema = Schema::new("test");
        for spec in specs {
            schema.define(spec).expect("valid spec");
        }
        schema
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let schema = schema_with(vec![OptionSpec::flag("verbose")]);
        let matches = Matches::new(&schema, HashMap::new(), Vec::new());
        assert_eq!(matches.count("verbose"), 0);
        assert_eq!(matches.count("never-declared"), 0);
    }

    #[test]
    fn test_get_returns_default_when_absent() {
        let schema = schema_with(vec![
            OptionSpec::scalar("format", ScalarKind::Str).with_default("plain"),
        ]);
        let matches = Matches::new(&schema, HashMap::new(), Vec::new());
        assert_eq!(matches.get::<String>("format").unwrap(), "plain");
    }

    #[test]
    fn test_get_absent_without_default() {
        let schema = schema_with(vec![OptionSpec::scalar("format", ScalarKind::Str)]);
        let matches = Matches::new(&schema, HashMap::new(), Vec::new());
        assert_eq!(
            matches.get::<String>("format").unwrap_err(),
            AccessError::OptionNotPresent("format".to_string())
        );
    }

    #[test]
    fn test_get_rejects_kind_mismatch() {
        let schema = schema_with(vec![OptionSpec::scalar("level", ScalarKind::Int)]);
        let mut matched = HashMap::new();
        let mut parsed = ParsedOption::default();
        parsed.push(Value::Int(3));
        matched.insert("level".to_string(), parsed);
        let matches = Matches::new(&schema, matched, Vec::new());

        assert_eq!(matches.get::<i64>("level").unwrap(), 3);
        assert_eq!(
            matches.get::<String>("level").unwrap_err(),
            AccessError::TypeMismatch("level".to_string())
        );
        assert_eq!(
            matches.get::<Vec<i64>>("level").unwrap_err(),
            AccessError::TypeMismatch("level".to_string())
        );
    }

    #[test]
    fn test_get_on_flag_is_mismatch() {
        let schema = schema_with(vec![OptionSpec::flag("verbose")]);
        let mut matched = HashMap::new();
        let mut parsed = ParsedOption::default();
        parsed.record_flag();
        matched.insert("verbose".to_string(), parsed);
        let matches = Matches::new(&schema, matched, Vec::new());

        assert_eq!(matches.count("verbose"), 1);
        assert_eq!(
            matches.get::<bool>("verbose").unwrap_err(),
            AccessError::TypeMismatch("verbose".to_string())
        );
    }

    #[test]
    fn test_list_values_keep_match_order() {
        let schema = schema_with(vec![OptionSpec::list("include", ScalarKind::Str)]);
        let mut parsed = ParsedOption::default();
        parsed.push(Value::Str("a".into()));
        parsed.push(Value::Str("b".into()));
        let mut matched = HashMap::new();
        matched.insert("include".to_string(), parsed);
        let matches = Matches::new(&schema, matched, Vec::new());

        assert_eq!(
            matches.get::<Vec<String>>("include").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
