//! Parse-time error types.
//!
//! All parse failures abort the current parse call immediately; there is no
//! partial result. The variants split the failure modes finely enough for a
//! presentation layer to distinguish unknown options, missing values,
//! missing required options/positionals, invalid values, and illegal
//! repeats.

use optline_core::CoerceError;
use thiserror::Error;

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A token matched option syntax but resolved to nothing. Carries the
    /// offending token as written (`--nope`, `-x`).
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A value-consuming option had no usable next token (end of argv, or
    /// the next token is itself option-shaped).
    #[error("option '{0}' requires a value")]
    MissingArgument(String),

    /// A flag was given an inline `=value`.
    #[error("option '{0}' does not take a value")]
    UnexpectedValue(String),

    /// A captured raw string failed coercion to the declared kind.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidValue {
        option: String,
        value: String,
        #[source]
        source: CoerceError,
    },

    /// A non-repeatable option occurred more than once.
    #[error("option '{0}' may not be repeated")]
    RepeatedOption(String),

    /// A required option never matched and has no default.
    #[error("missing required option: {0}")]
    MissingRequired(String),

    /// A required positional name had no token to bind and no default.
    #[error("missing required positional argument: {0}")]
    MissingPositional(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
