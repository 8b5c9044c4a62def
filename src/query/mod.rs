//! Query module
//!
//! Defines the canonical [`Query`] sent to backends, the free-form query
//! mini-language parser and the normalizer that merges the free-form `q`
//! parameter with the legacy discrete fields.
//!
//! The canonical query is regex-only: literal input is always escaped before
//! it is stored.

mod normalize;
mod parser;

pub use normalize::{normalize, NormalizeError, Normalized, RawParams};
pub use parser::{parse, ParseError};

use crate::results::SearchType;
use serde::{Deserialize, Serialize};

/// Canonical, regex-only search query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Pattern matched against each line of each file
    pub line: String,
    /// Pattern restricting the file path
    pub file: String,
    /// Pattern restricting the repository/tree name
    pub repo: String,
    /// Case-insensitive matching
    pub fold_case: bool,
    /// Match limit; 0 means "use the server default"
    pub max_matches: i32,
    /// Match file names instead of file contents
    pub filename_only: bool,
    /// Match tree names instead of file contents
    pub treename_only: bool,
}

impl Query {
    /// Create a regex query for a single line pattern
    pub fn line(pattern: impl Into<String>) -> Self {
        Self {
            line: pattern.into(),
            ..Default::default()
        }
    }

    /// Whether the query names something to match at all
    pub fn has_pattern(&self) -> bool {
        !self.line.is_empty()
            || (self.filename_only && !self.file.is_empty())
            || (self.treename_only && !self.repo.is_empty())
    }

    /// Substitute `default` when no match limit was requested
    pub fn with_default_max_matches(mut self, default: i32) -> Self {
        if self.max_matches == 0 {
            self.max_matches = default;
        }
        self
    }

    /// Kind of search this query performs, by priority
    pub fn search_type(&self) -> SearchType {
        if self.filename_only {
            SearchType::FilenameOnly
        } else if self.treename_only {
            SearchType::TreenameOnly
        } else {
            SearchType::Normal
        }
    }
}

/// Escape `text` into a regex that matches only that literal text
pub fn escape_regex(text: &str) -> String {
    regex::escape(text)
}
