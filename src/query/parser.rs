//! Free-form query mini-language
//!
//! Handles the `q` parameter syntax:
//! - Bare terms, joined by a single space into the line pattern
//! - Double-quoted values with `\"` and `\\` escapes: `"foo bar"`, `file:"a b"`
//! - Restrictions: `file:` (`f:`), `repo:` (`r:`)
//! - Name-only searches: `path:` (file names), `tree:` (tree names)
//! - Literal line terms: `lit:` (escaped even in regex mode)
//! - Match limit: `max_matches:N`
//!
//! A `key:` prefix that is not one of the above stays part of a bare term,
//! so `std::vector` is searched as written.

use super::{escape_regex, Query};
use regex::Regex;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Errors produced while parsing a free-form query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated quoted string at offset {0}")]
    UnterminatedQuote(usize),

    #[error("missing value for `{0}:`")]
    EmptyValue(&'static str),

    #[error("got multiple values for `{0}:`")]
    Duplicate(&'static str),

    #[error("invalid max_matches: {0:?}")]
    InvalidMaxMatches(String),

    #[error("invalid regex in {field}: {message}")]
    InvalidRegex { field: &'static str, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    File,
    Path,
    Repo,
    Tree,
    Lit,
    MaxMatches,
}

impl Directive {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "file" | "f" => Some(Self::File),
            "path" => Some(Self::Path),
            "repo" | "r" => Some(Self::Repo),
            "tree" => Some(Self::Tree),
            "lit" => Some(Self::Lit),
            "max_matches" => Some(Self::MaxMatches),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Path => "path",
            Self::Repo => "repo",
            Self::Tree => "tree",
            Self::Lit => "lit",
            Self::MaxMatches => "max_matches",
        }
    }
}

#[derive(Debug)]
struct Token {
    directive: Option<Directive>,
    value: String,
}

/// Parse a free-form query into a canonical [`Query`].
///
/// In literal mode (`regex == false`) every value is escaped; in regex mode
/// every resulting pattern must compile.
pub fn parse(raw: &str, regex: bool) -> Result<Query, ParseError> {
    let pattern = |value: &str| {
        if regex {
            value.to_string()
        } else {
            escape_regex(value)
        }
    };

    let mut query = Query::default();
    let mut terms = Vec::new();
    let mut file = None;
    let mut repo = None;
    let mut max_matches = None;

    for token in tokenize(raw)? {
        let Some(directive) = token.directive else {
            terms.push(pattern(&token.value));
            continue;
        };
        if token.value.is_empty() {
            return Err(ParseError::EmptyValue(directive.name()));
        }

        match directive {
            Directive::Lit => terms.push(escape_regex(&token.value)),
            Directive::File | Directive::Path => {
                if file.replace(pattern(&token.value)).is_some() {
                    return Err(ParseError::Duplicate(directive.name()));
                }
                query.filename_only |= directive == Directive::Path;
            }
            Directive::Repo | Directive::Tree => {
                if repo.replace(pattern(&token.value)).is_some() {
                    return Err(ParseError::Duplicate(directive.name()));
                }
                query.treename_only |= directive == Directive::Tree;
            }
            Directive::MaxMatches => {
                let limit = token
                    .value
                    .parse::<i32>()
                    .ok()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| ParseError::InvalidMaxMatches(token.value.clone()))?;
                if max_matches.replace(limit).is_some() {
                    return Err(ParseError::Duplicate(directive.name()));
                }
            }
        }
    }

    query.line = terms.join(" ");
    query.file = file.unwrap_or_default();
    query.repo = repo.unwrap_or_default();
    query.max_matches = max_matches.unwrap_or(0);

    if regex {
        check_regex("line", &query.line)?;
        check_regex("file", &query.file)?;
        check_regex("repo", &query.repo)?;
    }

    Ok(query)
}

fn check_regex(field: &'static str, pattern: &str) -> Result<(), ParseError> {
    if pattern.is_empty() {
        return Ok(());
    }
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ParseError::InvalidRegex {
            field,
            message: e.to_string(),
        })
}

fn tokenize(raw: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut text = String::new();
        // Offset of a directive colon; only a colon before any quote counts
        let mut colon = None;
        let mut quoted = false;

        while let Some((pos, c)) = chars.next_if(|(_, c)| !c.is_whitespace()) {
            match c {
                '"' => {
                    quoted = true;
                    read_quoted(&mut chars, &mut text).ok_or(ParseError::UnterminatedQuote(pos))?;
                }
                ':' if colon.is_none() && !quoted => {
                    colon = Some(text.len());
                    text.push(c);
                }
                _ => text.push(c),
            }
        }

        let directive = colon.and_then(|i| Directive::from_key(&text[..i]));
        let value = match (directive, colon) {
            (Some(_), Some(i)) => text[i + 1..].to_string(),
            _ => text,
        };
        tokens.push(Token { directive, value });
    }

    Ok(tokens)
}

/// Consume a quoted run up to and including the closing quote.
/// Returns `None` when the input ends first.
fn read_quoted(chars: &mut Peekable<CharIndices<'_>>, out: &mut String) -> Option<()> {
    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Some(()),
            '\\' => match chars.next()? {
                (_, escaped @ ('"' | '\\')) => out.push(escaped),
                (_, other) => {
                    out.push('\\');
                    out.push(other);
                }
            },
            _ => out.push(c),
        }
    }
    None
}
