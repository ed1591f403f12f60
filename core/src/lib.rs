//! Core types for the optline argument-parsing engine.
//!
//! This crate defines the declarative surface shared by the parsing engine
//! and its consumers:
//!
//! - [`OptionSpec`] — one option: long name, optional alias, value kind,
//!   default, arity.
//! - [`Schema`] — the build-once registry of specs, alias index, and
//!   positional binding order.
//! - [`Value`] / [`ScalarKind`] / [`ValueKind`] — the closed tagged value
//!   model.
//! - [`coerce`] — raw-token-to-typed-value conversion with
//!   [`CoerceError`].
//! - [`FromValue`] — strict conversion from stored values to Rust types.
//!
//! Construction errors ([`SchemaError`]) catch duplicate names/aliases and
//! malformed defaults before a parse ever runs. The walk itself lives in
//! the `optline-engine` crate.
//!
//! # Example
//!
//! ```
//! use optline_core::{OptionSpec, ScalarKind, Schema};
//!
//! let mut schema = Schema::new("packer")
//!     .with_about("Bundle files into an archive");
//! schema.define(OptionSpec::flag("verbose").with_alias('v').allow_repeats()).unwrap();
//! schema.define(
//!     OptionSpec::scalar("level", ScalarKind::Int).with_alias('l').with_default(6i64),
//! ).unwrap();
//! schema.define(OptionSpec::list("files", ScalarKind::Str)).unwrap();
//! schema.set_positional_order(&["files"]).unwrap();
//!
//! assert_eq!(schema.len(), 3);
//! assert!(schema.resolve("l").is_some());
//! ```

mod schema;
mod spec;
mod value;

pub use schema::{Schema, SchemaError};
pub use spec::OptionSpec;
pub use value::{CoerceError, FromValue, ScalarKind, Value, ValueKind, coerce};
