//! Public reply schema of the search API

use serde::{Deserialize, Serialize};

/// Kind of search performed, derived from the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    Normal,
    FilenameOnly,
    TreenameOnly,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::FilenameOnly => "filename_only",
            Self::TreenameOnly => "treename_only",
        }
    }
}

/// A matching line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResult {
    pub tree: String,
    pub version: String,
    pub path: String,
    #[serde(rename = "lno")]
    pub line_number: i64,
    pub context_before: Vec<String>,
    pub context_after: Vec<String>,
    /// `[left, right]` offsets of the match within `line`
    pub bounds: [i32; 2],
    pub line: String,
}

/// A matching file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub tree: String,
    pub version: String,
    pub path: String,
    pub bounds: [i32; 2],
}

/// Browse metadata for a matching tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMetadata {
    pub labels: Vec<String>,
    pub external_url: String,
}

/// A matching tree name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeResult {
    pub name: String,
    pub version: String,
    pub bounds: [i32; 2],
    pub metadata: TreeMetadata,
}

/// Timings in milliseconds plus the backend's exit reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub re2_time: i64,
    pub git_time: i64,
    pub sort_time: i64,
    pub index_time: i64,
    pub analyze_time: i64,
    /// Wall-clock time of the whole backend call, measured here
    pub total_time: i64,
    pub exit_reason: String,
}

/// Successful search reply; every sequence is always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReply {
    pub results: Vec<LineResult>,
    pub file_results: Vec<FileResult>,
    pub tree_results: Vec<TreeResult>,
    pub search_type: SearchType,
    pub info: Stats,
}

/// Error envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyError {
    pub error: InnerError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerError {
    pub code: String,
    pub message: String,
}

impl ReplyError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: InnerError {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_reply_serializes_arrays() {
        let value = serde_json::to_value(SearchReply::default()).unwrap();
        assert_eq!(value["results"], json!([]));
        assert_eq!(value["file_results"], json!([]));
        assert_eq!(value["tree_results"], json!([]));
        assert_eq!(value["search_type"], json!("normal"));
        assert_eq!(value["info"]["total_time"], json!(0));
    }

    #[test]
    fn test_search_type_labels() {
        for kind in [
            SearchType::Normal,
            SearchType::FilenameOnly,
            SearchType::TreenameOnly,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_line_result_field_names() {
        let result = LineResult {
            tree: "t".to_string(),
            version: "v".to_string(),
            path: "p".to_string(),
            line_number: 9,
            context_before: vec![],
            context_after: vec!["after".to_string()],
            bounds: [1, 4],
            line: "line".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["lno"], json!(9));
        assert_eq!(value["bounds"], json!([1, 4]));
        assert_eq!(value["context_before"], json!([]));
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ReplyError::new("bad_query", "nope")).unwrap();
        assert_eq!(value, json!({"error": {"code": "bad_query", "message": "nope"}}));
    }
}
