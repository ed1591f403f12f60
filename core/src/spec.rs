//! Option specification type and builders.

use serde::{Deserialize, Serialize};

use crate::{ScalarKind, Value, ValueKind};

/// Declarative specification of a single command-line option.
///
/// An option has a unique long name (matched as `--name`), an optional
/// single-character alias (matched as `-a`, enforced one-character by the
/// `char` type), a value kind, and arity metadata. Specs are plain data:
/// they serialize with [`serde`] so whole option sets can be loaded from
/// JSON.
///
/// Use the constructors [`flag`](OptionSpec::flag),
/// [`scalar`](OptionSpec::scalar), and [`list`](OptionSpec::list), then
/// chain builder methods.
///
/// # Examples
///
/// ```
/// use optline_core::{OptionSpec, ScalarKind};
///
/// let verbose = OptionSpec::flag("verbose")
///     .with_alias('v')
///     .with_description("Enable verbose output")
///     .allow_repeats();
/// assert!(!verbose.kind.takes_value());
/// assert_eq!(verbose.alias, Some('v'));
///
/// let output = OptionSpec::scalar("output", ScalarKind::Str)
///     .with_default("out.txt");
/// assert!(output.kind.takes_value());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name, matched as `--name` (unique within a schema).
    pub name: String,
    /// Single-character short form, matched as `-a`.
    #[serde(default)]
    pub alias: Option<char>,
    /// Description used by help rendering.
    #[serde(default)]
    pub description: Option<String>,
    /// What kind of value this option accepts.
    #[serde(default)]
    pub kind: ValueKind,
    /// Default value, returned by lookups when the option never matched.
    /// Scalar kinds only; must match the declared scalar kind.
    #[serde(default)]
    pub default: Option<Value>,
    /// Whether a parse without this option fails.
    #[serde(default)]
    pub required: bool,
    /// Whether repeated occurrences are permitted. For scalar kinds a
    /// permitted repeat overwrites (last wins); list kinds append
    /// regardless of this setting.
    #[serde(default)]
    pub repeatable: bool,
}

impl OptionSpec {
    fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            description: None,
            kind,
            default: None,
            required: false,
            repeatable: false,
        }
    }

    /// Creates a boolean-presence flag (never consumes a value token).
    ///
    /// # Examples
    ///
    /// ```
    /// use optline_core::{OptionSpec, ValueKind};
    ///
    /// let spec = OptionSpec::flag("help");
    /// assert_eq!(spec.kind, ValueKind::Flag);
    /// ```
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueKind::Flag)
    }

    /// Creates an option holding a single value of the given kind.
    pub fn scalar(name: &str, kind: ScalarKind) -> Self {
        Self::new(name, ValueKind::Scalar(kind))
    }

    /// Creates an option accumulating one value per occurrence.
    pub fn list(name: &str, kind: ScalarKind) -> Self {
        Self::new(name, ValueKind::List(kind))
    }

    /// Sets the single-character short form.
    pub fn with_alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Sets the help description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the default value. Validated against the declared kind when
    /// the spec is defined on a [`Schema`](crate::Schema).
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the option as required.
    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    /// Permits repeated occurrences.
    pub fn allow_repeats(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let spec = OptionSpec::scalar("level", ScalarKind::Int)
            .with_alias('l')
            .with_description("Compression level")
            .with_default(6i64)
            .require();

        assert_eq!(spec.name, "level");
        assert_eq!(spec.alias, Some('l'));
        assert_eq!(spec.default, Some(Value::Int(6)));
        assert!(spec.required);
        assert!(!spec.repeatable);
    }

    #[test]
    fn test_spec_deserializes_with_sparse_fields() {
        let spec: OptionSpec = serde_json::from_str(r#"{"name": "quiet"}"#).unwrap();
        assert_eq!(spec.name, "quiet");
        assert_eq!(spec.kind, ValueKind::Flag);
        assert_eq!(spec.alias, None);
        assert!(!spec.required);
    }

    #[test]
    fn test_spec_serde_round_trip() {
        let spec = OptionSpec::list("include", ScalarKind::Str).with_alias('I');
        let json = serde_json::to_string(&spec).unwrap();
        let back: OptionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
