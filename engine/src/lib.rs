//! The optline parsing engine: tokenizer/matcher, positional binder, and
//! result store.
//!
//! Given a frozen [`Schema`](optline_core::Schema) and a raw argument
//! vector, [`parse`] walks the vector once, left to right:
//!
//! - `--name` / `--name=value` resolve against the long-name map; a
//!   value-consuming option without an inline value takes the next token,
//!   unless that token is itself option-shaped.
//! - `-abc` resolves each character against the alias index: leading flags
//!   bundle, the first value-consuming alias takes the cluster remainder
//!   (`-ofile`) or the next token.
//! - `--` terminates option matching; everything after it is positional.
//! - Anything else is deferred and later bound to the schema's declared
//!   positional names, the trailing name absorbing the remainder when it
//!   is a list kind.
//!
//! The result is a [`Matches`] store: occurrence counts, typed values, and
//! the leftover tokens in original order. Parsing is synchronous, performs
//! no I/O, and only reads the schema — one `&Schema` may back concurrent
//! parses over independent argument vectors.
//!
//! # Example
//!
//! ```
//! use optline_core::{OptionSpec, ScalarKind, Schema};
//! use optline_engine::parse;
//!
//! let mut schema = Schema::new("grepish");
//! schema.define(OptionSpec::flag("count").with_alias('c')).unwrap();
//! schema.define(OptionSpec::scalar("pattern", ScalarKind::Str)).unwrap();
//! schema.define(OptionSpec::list("files", ScalarKind::Str)).unwrap();
//! schema.set_positional_order(&["pattern", "files"]).unwrap();
//!
//! let argv: Vec<String> = ["-c", "needle", "a.txt", "b.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let matches = parse(&schema, &argv).unwrap();
//! assert_eq!(matches.count("count"), 1);
//! assert_eq!(matches.get::<String>("pattern").unwrap(), "needle");
//! assert_eq!(
//!     matches.get::<Vec<String>>("files").unwrap(),
//!     vec!["a.txt".to_string(), "b.txt".to_string()],
//! );
//! ```

mod error;
mod matches;
mod parser;
mod token;

pub use error::{ParseError, Result};
pub use matches::{AccessError, FromMatch, Matches, ParsedOption};
pub use parser::{parse, parse_in_place};
