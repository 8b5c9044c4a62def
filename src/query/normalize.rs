//! Merge of the free-form `q` parameter and the legacy discrete fields
//!
//! Precedence, applied in a single pass:
//! 1. `regex` is true unless its value is exactly `"false"`.
//! 2. `q`, when present, seeds the query through the mini-language parser.
//! 3. Legacy `line`, `file` and `repo` override the matching field outright;
//!    in literal mode each value is escaped first.
//! 4. `fold_case` of `"true"`/`"false"` wins; anything else (or absence)
//!    infers case folding from the final line pattern alone. `file` and
//!    `repo` are never inspected. This asymmetry is long-standing behavior
//!    that clients rely on.

use super::{escape_regex, parse, ParseError, Query};
use thiserror::Error;
use tracing::debug;

/// Raw request parameters, in arrival order.
///
/// Names may repeat; the first value for a name is the one that counts.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value given for `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Outcome of normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub query: Query,
    /// Whether user input was interpreted as regex
    pub regex: bool,
}

/// Why a parameter set could not become a dispatchable query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("You must specify a {} to match", pattern_kind(.regex))]
    NoPattern { regex: bool },
}

fn pattern_kind(regex: &bool) -> &'static str {
    if *regex {
        "regex"
    } else {
        "string"
    }
}

/// Turn raw request parameters into a canonical query.
///
/// A query with nothing to match is rejected here, before any backend is
/// contacted.
pub fn normalize(params: &RawParams) -> Result<Normalized, NormalizeError> {
    let regex = params.first("regex") != Some("false");

    let mut query = match params.first("q") {
        Some(q) => {
            let parsed = parse(q, regex)?;
            debug!(q, out = ?parsed, "parsed query");
            parsed
        }
        None => Query::default(),
    };

    let legacy = |value: &str| {
        if regex {
            value.to_string()
        } else {
            escape_regex(value)
        }
    };
    if let Some(line) = params.first("line") {
        query.line = legacy(line);
    }
    if let Some(file) = params.first("file") {
        query.file = legacy(file);
    }
    if let Some(repo) = params.first("repo") {
        query.repo = legacy(repo);
    }

    query.fold_case = match params.first("fold_case") {
        Some("true") => true,
        Some("false") => false,
        _ => !query.line.bytes().any(|b| b.is_ascii_uppercase()),
    };

    if !query.has_pattern() {
        return Err(NormalizeError::NoPattern { regex });
    }

    Ok(Normalized { query, regex })
}
