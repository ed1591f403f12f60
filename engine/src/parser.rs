//! The matcher walk and positional binder.
//!
//! A parse is one left-to-right pass over the argument vector, no
//! backtracking. Each token classifies syntactically, resolves against the
//! schema, and either records a match, consumes the following token as its
//! value, or is deferred. Deferred tokens are then bound to the schema's
//! positional-name list; whatever remains becomes the leftover sequence.
//!
//! The value-consumption rule is strict: a token matching option syntax is
//! never consumed as a value unless it was attached with `=` or as a
//! short-cluster remainder. `--opt -x` is always two options (or an
//! unknown-option failure), never `-x` as a value. Numeric-looking tokens
//! (`-5`) are the one carve-out — they never classify as options.

use std::collections::HashMap;

use tracing::{debug, warn};

use optline_core::{OptionSpec, ScalarKind, Schema, ValueKind, coerce};

use crate::error::ParseError;
use crate::matches::{Matches, ParsedOption};
use crate::token::{Token, classify, is_option_shaped};

/// Parses an argument vector against a schema.
///
/// The input is borrowed, never mutated; leftover tokens come back as an
/// owned sequence on the returned [`Matches`].
///
/// # Examples
///
/// ```
/// use optline_core::{OptionSpec, ScalarKind, Schema};
/// use optline_engine::parse;
///
/// let mut schema = Schema::new("tool");
/// schema.define(OptionSpec::flag("verbose").with_alias('v')).unwrap();
/// schema.define(OptionSpec::scalar("output", ScalarKind::Str).with_alias('o')).unwrap();
///
/// let argv: Vec<String> = ["-v", "--output", "out.txt"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let matches = parse(&schema, &argv).unwrap();
/// assert_eq!(matches.count("verbose"), 1);
/// assert_eq!(matches.get::<String>("output").unwrap(), "out.txt");
/// ```
///
/// # Errors
///
/// Any [`ParseError`]; on failure no partial result is returned.
pub fn parse<'s>(schema: &'s Schema, argv: &[String]) -> Result<Matches<'s>, ParseError> {
    Walker::new(schema).run(argv)
}

/// Compatibility adapter for callers that expect their argument vector to
/// shrink to the unconsumed tokens. On success `argv` retains exactly the
/// leftover sequence; on failure it is untouched.
pub fn parse_in_place<'s>(
    schema: &'s Schema,
    argv: &mut Vec<String>,
) -> Result<Matches<'s>, ParseError> {
    let matches = parse(schema, argv)?;
    argv.clear();
    argv.extend(matches.leftovers().iter().cloned());
    Ok(matches)
}

/// Per-parse state. Leftover candidates carry their argv index so the final
/// leftover sequence preserves original order across the two buckets.
struct Walker<'s> {
    schema: &'s Schema,
    matched: HashMap<String, ParsedOption>,
    deferred: Vec<(usize, String)>,
    unmatched: Vec<(usize, String)>,
}

impl<'s> Walker<'s> {
    fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            matched: HashMap::new(),
            deferred: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    fn run(mut self, argv: &[String]) -> Result<Matches<'s>, ParseError> {
        debug!(
            program = self.schema.name(),
            tokens = argv.len(),
            "parsing argument vector"
        );

        let mut i = 0;
        while i < argv.len() {
            let token = argv[i].as_str();
            match classify(token) {
                Token::Terminator => {
                    for (offset, rest) in argv[i + 1..].iter().enumerate() {
                        self.deferred.push((i + 1 + offset, rest.clone()));
                    }
                    break;
                }
                Token::Long { name, inline } => {
                    i += self.match_long(name, inline, token, argv, i)?;
                }
                Token::Cluster(chars) => {
                    i += self.match_cluster(chars, token, argv, i)?;
                }
                Token::Positional => {
                    self.deferred.push((i, token.to_string()));
                    i += 1;
                }
            }
        }

        self.bind_positionals()?;
        self.check_required()?;
        Ok(self.finish())
    }

    /// Matches a long option token. Returns the number of argv tokens
    /// consumed (2 when the value came from the next token).
    fn match_long(
        &mut self,
        name: &str,
        inline: Option<&str>,
        raw: &str,
        argv: &[String],
        i: usize,
    ) -> Result<usize, ParseError> {
        let Some(spec) = self.schema.get(name) else {
            return self.unrecognized(raw, i);
        };
        let display = format!("--{name}");
        match spec.kind {
            ValueKind::Flag => {
                if inline.is_some() {
                    return Err(ParseError::UnexpectedValue(display));
                }
                self.record_flag(spec, &display)?;
                Ok(1)
            }
            ValueKind::Scalar(kind) | ValueKind::List(kind) => {
                if let Some(value) = inline {
                    self.record_value(spec, kind, &display, value)?;
                    Ok(1)
                } else {
                    let value = take_next(argv, i, &display)?;
                    self.record_value(spec, kind, &display, value)?;
                    Ok(2)
                }
            }
        }
    }

    /// Matches a short cluster. Leading flag aliases bundle; the first
    /// value-consuming alias takes the cluster remainder verbatim, or the
    /// next token when it is the last character.
    fn match_cluster(
        &mut self,
        chars: &str,
        raw: &str,
        argv: &[String],
        i: usize,
    ) -> Result<usize, ParseError> {
        for (offset, alias) in chars.char_indices() {
            let Some(spec) = self.schema.resolve_alias(alias) else {
                return self.unrecognized(raw, i);
            };
            let display = format!("-{alias}");
            match spec.kind {
                ValueKind::Flag => self.record_flag(spec, &display)?,
                ValueKind::Scalar(kind) | ValueKind::List(kind) => {
                    let rest = &chars[offset + alias.len_utf8()..];
                    if rest.is_empty() {
                        let value = take_next(argv, i, &display)?;
                        self.record_value(spec, kind, &display, value)?;
                        return Ok(2);
                    }
                    self.record_value(spec, kind, &display, rest)?;
                    return Ok(1);
                }
            }
        }
        Ok(1)
    }

    /// Unknown option token: fail, or keep the whole raw token as a
    /// leftover in permissive mode. Flags bundled before an unknown
    /// cluster character stay counted (single pass, no rollback).
    fn unrecognized(&mut self, raw: &str, i: usize) -> Result<usize, ParseError> {
        if self.schema.permissive() {
            warn!(token = raw, "unrecognized option kept as leftover");
            self.unmatched.push((i, raw.to_string()));
            return Ok(1);
        }
        Err(ParseError::UnknownOption(raw.to_string()))
    }

    fn record_flag(&mut self, spec: &OptionSpec, display: &str) -> Result<(), ParseError> {
        let entry = self.matched.entry(spec.name.clone()).or_default();
        if entry.count() > 0 && !spec.repeatable {
            return Err(ParseError::RepeatedOption(display.to_string()));
        }
        entry.record_flag();
        Ok(())
    }

    fn record_value(
        &mut self,
        spec: &OptionSpec,
        kind: ScalarKind,
        display: &str,
        raw: &str,
    ) -> Result<(), ParseError> {
        let value = coerce(raw, kind).map_err(|source| ParseError::InvalidValue {
            option: display.to_string(),
            value: raw.to_string(),
            source,
        })?;

        let entry = self.matched.entry(spec.name.clone()).or_default();
        if spec.kind.is_list() || entry.count() == 0 {
            entry.push(value);
        } else if spec.repeatable {
            entry.replace_last(value);
        } else {
            return Err(ParseError::RepeatedOption(display.to_string()));
        }
        Ok(())
    }

    /// Assigns deferred tokens to the declared positional names in order.
    /// Scalar positionals that already hold a value (explicitly matched or
    /// bound earlier) are skipped; a trailing list name absorbs everything
    /// that reaches it. Unassigned tokens stay leftovers.
    fn bind_positionals(&mut self) -> Result<(), ParseError> {
        let schema = self.schema;
        let order = schema.positional_order();
        let deferred = std::mem::take(&mut self.deferred);

        let mut cursor = 0;
        'tokens: for (index, token) in deferred {
            while cursor < order.len() {
                let name = order[cursor].as_str();
                let Some(spec) = schema.get(name) else {
                    cursor += 1;
                    continue;
                };
                match spec.kind {
                    ValueKind::List(kind) => {
                        self.record_value(spec, kind, name, &token)?;
                        continue 'tokens;
                    }
                    ValueKind::Scalar(kind) => {
                        if self.count(name) > 0 {
                            cursor += 1;
                            continue;
                        }
                        self.record_value(spec, kind, name, &token)?;
                        continue 'tokens;
                    }
                    ValueKind::Flag => {
                        cursor += 1;
                    }
                }
            }
            self.unmatched.push((index, token));
        }
        Ok(())
    }

    fn check_required(&self) -> Result<(), ParseError> {
        for spec in self.schema.iter() {
            if !spec.required || spec.default.is_some() || self.count(&spec.name) > 0 {
                continue;
            }
            if self.schema.is_positional(&spec.name) {
                return Err(ParseError::MissingPositional(spec.name.clone()));
            }
            return Err(ParseError::MissingRequired(spec.name.clone()));
        }
        Ok(())
    }

    fn count(&self, name: &str) -> usize {
        self.matched.get(name).map(ParsedOption::count).unwrap_or(0)
    }

    fn finish(mut self) -> Matches<'s> {
        self.unmatched.sort_by_key(|(index, _)| *index);
        let leftovers: Vec<String> = self
            .unmatched
            .into_iter()
            .map(|(_, token)| token)
            .collect();
        debug!(
            matched = self.matched.len(),
            leftovers = leftovers.len(),
            "parse complete"
        );
        Matches::new(self.schema, self.matched, leftovers)
    }
}

/// Consumes the following token as a value under the strict syntactic rule.
fn take_next<'a>(argv: &'a [String], i: usize, display: &str) -> Result<&'a str, ParseError> {
    match argv.get(i + 1) {
        Some(next) if !is_option_shaped(next) => Ok(next.as_str()),
        _ => Err(ParseError::MissingArgument(display.to_string())),
    }
}
