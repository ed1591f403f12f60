//! Option schema registry and construction-time validation.
//!
//! A [`Schema`] is built once by `define` calls, then read by the parsing
//! engine. Construction catches duplicate names and aliases, malformed
//! defaults, and dangling positional references before any parse runs.
//! Immutability during parse is the borrow checker's job: `define` takes
//! `&mut self` while parsing borrows `&Schema`, so the two cannot
//! interleave on one instance.
//!
//! # Examples
//!
//! ```
//! use optline_core::{OptionSpec, ScalarKind, Schema, SchemaError};
//!
//! let mut schema = Schema::new("copytool");
//! schema.define(OptionSpec::flag("verbose").with_alias('v')).unwrap();
//! schema.define(OptionSpec::scalar("input", ScalarKind::Str)).unwrap();
//! schema.set_positional_order(&["input"]).unwrap();
//!
//! assert!(schema.resolve("verbose").is_some());
//! assert!(schema.resolve("v").is_some());
//!
//! // Second definition of the same name is rejected.
//! let err = schema.define(OptionSpec::flag("verbose")).unwrap_err();
//! assert_eq!(err, SchemaError::DuplicateName("verbose".to_string()));
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::{OptionSpec, ValueKind};

/// Schema construction errors.
///
/// All variants are fatal to the caller's setup phase — a parse must not
/// run against a malformed schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Option name is empty.
    #[error("option name cannot be empty")]
    EmptyName,
    /// Two options share a long name.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),
    /// Two options share a short alias.
    #[error("duplicate option alias: -{0}")]
    DuplicateAlias(char),
    /// A positional-order entry names an option that was never defined.
    #[error("unknown positional name: {0}")]
    UnknownPositionalName(String),
    /// A default value is present on a flag or list kind, or its kind does
    /// not match the declared scalar kind.
    #[error("invalid default for option '{0}': {1}")]
    InvalidDefault(String, String),
}

/// Immutable-after-build registry of option specifications.
///
/// Holds the declared specs in declaration order (help rendering relies on
/// it), a name lookup map, an alias index, and the ordered positional-name
/// list. The program name and about-string live here as explicit values so
/// multiple schemas coexist in one process without shared state.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    name: String,
    about: Option<String>,
    specs: Vec<OptionSpec>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<char, usize>,
    positional: Vec<String>,
    allow_unrecognized: bool,
}

impl Schema {
    /// Creates an empty schema for the named program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the about-string shown by help rendering.
    pub fn with_about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    /// Switches the schema to permissive mode: unrecognized option tokens
    /// become leftovers instead of failing the parse.
    pub fn allow_unrecognized(mut self) -> Self {
        self.allow_unrecognized = true;
        self
    }

    /// Registers an option specification.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyName`], [`SchemaError::DuplicateName`],
    /// [`SchemaError::DuplicateAlias`], or [`SchemaError::InvalidDefault`].
    pub fn define(&mut self, spec: OptionSpec) -> Result<(), SchemaError> {
        if spec.name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if self.by_name.contains_key(&spec.name) {
            return Err(SchemaError::DuplicateName(spec.name));
        }
        if let Some(alias) = spec.alias {
            if self.by_alias.contains_key(&alias) {
                return Err(SchemaError::DuplicateAlias(alias));
            }
        }
        validate_default(&spec)?;

        let index = self.specs.len();
        self.by_name.insert(spec.name.clone(), index);
        if let Some(alias) = spec.alias {
            self.by_alias.insert(alias, index);
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Declares which options are bound positionally, in binding order.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownPositionalName`] if any name was never
    /// defined.
    pub fn set_positional_order<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SchemaError> {
        let mut order = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !self.by_name.contains_key(name) {
                return Err(SchemaError::UnknownPositionalName(name.to_string()));
            }
            order.push(name.to_string());
        }
        self.positional = order;
        Ok(())
    }

    /// Resolves a long name or a single-character alias to its spec.
    pub fn resolve(&self, token: &str) -> Option<&OptionSpec> {
        if let Some(&index) = self.by_name.get(token) {
            return Some(&self.specs[index]);
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(alias), None) => self.resolve_alias(alias),
            _ => None,
        }
    }

    /// Resolves a short alias character to its spec.
    pub fn resolve_alias(&self, alias: char) -> Option<&OptionSpec> {
        self.by_alias.get(&alias).map(|&index| &self.specs[index])
    }

    /// The spec for an exact long name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.by_name.get(name).map(|&index| &self.specs[index])
    }

    /// Whether a long name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Declared specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no options are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Positional binding order, as passed to
    /// [`set_positional_order`](Schema::set_positional_order).
    pub fn positional_order(&self) -> &[String] {
        &self.positional
    }

    /// Whether the named option is bound positionally.
    pub fn is_positional(&self, name: &str) -> bool {
        self.positional.iter().any(|p| p == name)
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// About-string, if set.
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Whether unrecognized option tokens become leftovers.
    pub fn permissive(&self) -> bool {
        self.allow_unrecognized
    }
}

fn validate_default(spec: &OptionSpec) -> Result<(), SchemaError> {
    let Some(default) = &spec.default else {
        return Ok(());
    };
    match spec.kind {
        ValueKind::Flag => Err(SchemaError::InvalidDefault(
            spec.name.clone(),
            "flag options take no value".to_string(),
        )),
        ValueKind::List(_) => Err(SchemaError::InvalidDefault(
            spec.name.clone(),
            "list options take no default".to_string(),
        )),
        ValueKind::Scalar(kind) if default.kind() != kind => Err(SchemaError::InvalidDefault(
            spec.name.clone(),
            format!("default is {} but option is {}", default.kind(), kind),
        )),
        ValueKind::Scalar(_) => Ok(()),
    }
}
