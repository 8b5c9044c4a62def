//! Wire types of the backend `Search` call
//!
//! These mirror what a backend returns. They are never shown to API clients
//! directly; `results::shape` maps them into the public reply schema.

use serde::{Deserialize, Serialize};

/// Offset pair marking a matched span, exactly as the backend reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
}

impl Bounds {
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }
}

/// A matching line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub tree: String,
    pub version: String,
    pub path: String,
    pub line_number: i64,
    /// Absent when the backend was not asked for context
    pub context_before: Option<Vec<String>>,
    pub context_after: Option<Vec<String>>,
    pub bounds: Bounds,
    pub line: String,
}

/// A matching file path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResult {
    pub tree: String,
    pub version: String,
    pub path: String,
    pub bounds: Bounds,
}

/// Repository metadata attached to a tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub labels: Vec<String>,
    /// Base URL for browsing the repository
    #[serde(alias = "github")]
    pub repository_base_url: String,
}

/// A matching tree name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeResult {
    pub name: String,
    pub version: String,
    pub bounds: Bounds,
    pub metadata: Metadata,
}

/// Why the backend stopped searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    #[default]
    None,
    MatchLimit,
    Timeout,
}

impl ExitReason {
    /// Display name, as exposed to API clients and metric names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::MatchLimit => "MATCH_LIMIT",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component timings reported by the backend, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStats {
    pub re2_time: i64,
    pub git_time: i64,
    pub sort_time: i64,
    pub index_time: i64,
    pub analyze_time: i64,
    pub exit_reason: ExitReason,
}

/// Complete payload of a successful `Search` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeSearchResult {
    pub stats: SearchStats,
    pub results: Vec<SearchResult>,
    pub file_results: Vec<FileResult>,
    pub tree_results: Vec<TreeResult>,
}
