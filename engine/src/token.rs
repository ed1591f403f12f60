//! Token classification for the argv walk.
//!
//! Each raw argument classifies into exactly one [`Token`] shape before any
//! schema lookup happens. Classification is purely syntactic and transient;
//! tokens never outlive the single parse pass.

use std::sync::LazyLock;

use regex::Regex;

/// Transient classification of one raw argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`.
    Long {
        name: &'a str,
        inline: Option<&'a str>,
    },
    /// `-abc`: the characters after the dash, resolved independently
    /// against the alias index.
    Cluster(&'a str),
    /// Deferred to the positional binder.
    Positional,
    /// The literal `--`; everything after it is positional.
    Terminator,
}

/// Regex patterns for token classification.
static PATTERNS: LazyLock<TokenPatterns> = LazyLock::new(TokenPatterns::new);

struct TokenPatterns {
    long_option: Regex,
    negative_number: Regex,
}

impl TokenPatterns {
    fn new() -> Self {
        // An expect() failure here is a programmer error in the pattern,
        // not a runtime condition.
        Self {
            // --verbose, --log_level, --opt=value
            long_option: Regex::new(r"^--([A-Za-z0-9][-_A-Za-z0-9]*)(?:=(.*))?$")
                .expect("static regex must compile"),
            // -5, -2.5: numeric-looking tokens are never options
            negative_number: Regex::new(r"^-\d+(?:\.\d+)?$")
                .expect("static regex must compile"),
        }
    }
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    if token == "--" {
        return Token::Terminator;
    }
    if let Some(caps) = PATTERNS.long_option.captures(token) {
        if let Some(name) = caps.get(1) {
            return Token::Long {
                name: name.as_str(),
                inline: caps.get(2).map(|m| m.as_str()),
            };
        }
    }
    if PATTERNS.negative_number.is_match(token) {
        return Token::Positional;
    }
    if let Some(rest) = token.strip_prefix('-') {
        if !rest.is_empty() && !rest.starts_with('-') {
            return Token::Cluster(rest);
        }
    }
    Token::Positional
}

/// The strict value rule: a token matching option syntax is never consumed
/// as a value. Numeric-looking tokens (`-5`, `-2.5`) and the bare `-` are
/// not option-shaped; the terminator `--` is.
pub(crate) fn is_option_shaped(token: &str) -> bool {
    if token == "--" {
        return true;
    }
    if PATTERNS.negative_number.is_match(token) {
        return false;
    }
    token.len() > 1 && token.starts_with('-')
}
