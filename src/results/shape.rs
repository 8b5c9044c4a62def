//! Mapping of backend records into the public reply schema

use super::types::{FileResult, LineResult, SearchReply, SearchType, Stats, TreeMetadata, TreeResult};
use crate::backends::proto;

/// Browse URL of a tree at `version`.
///
/// Clients build links from this exact shape.
pub fn browse_url(repository_base_url: &str, version: &str) -> String {
    format!("{}/tree/{}", repository_base_url, version)
}

fn bounds(bounds: proto::Bounds) -> [i32; 2] {
    [bounds.left, bounds.right]
}

impl From<proto::SearchResult> for LineResult {
    fn from(r: proto::SearchResult) -> Self {
        Self {
            tree: r.tree,
            version: r.version,
            path: r.path,
            line_number: r.line_number,
            context_before: r.context_before.unwrap_or_default(),
            context_after: r.context_after.unwrap_or_default(),
            bounds: bounds(r.bounds),
            line: r.line,
        }
    }
}

impl From<proto::FileResult> for FileResult {
    fn from(r: proto::FileResult) -> Self {
        Self {
            tree: r.tree,
            version: r.version,
            path: r.path,
            bounds: bounds(r.bounds),
        }
    }
}

impl From<proto::TreeResult> for TreeResult {
    fn from(r: proto::TreeResult) -> Self {
        let external_url = browse_url(&r.metadata.repository_base_url, &r.version);
        Self {
            name: r.name,
            version: r.version,
            bounds: bounds(r.bounds),
            metadata: TreeMetadata {
                labels: r.metadata.labels,
                external_url,
            },
        }
    }
}

impl SearchReply {
    /// Build a reply from a backend payload, keeping backend order.
    ///
    /// `total_time_ms` is the caller-measured duration of the whole call.
    pub fn from_backend(
        result: proto::CodeSearchResult,
        search_type: SearchType,
        total_time_ms: i64,
    ) -> Self {
        let stats = result.stats;
        Self {
            results: result.results.into_iter().map(Into::into).collect(),
            file_results: result.file_results.into_iter().map(Into::into).collect(),
            tree_results: result.tree_results.into_iter().map(Into::into).collect(),
            search_type,
            info: Stats {
                re2_time: stats.re2_time,
                git_time: stats.git_time,
                sort_time: stats.sort_time,
                index_time: stats.index_time,
                analyze_time: stats.analyze_time,
                total_time: total_time_ms,
                exit_reason: stats.exit_reason.as_str().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::{Bounds, ExitReason};

    #[test]
    fn test_line_result_defaults_context() {
        let line: LineResult = proto::SearchResult {
            tree: "core".to_string(),
            version: "abc123".to_string(),
            path: "src/main.rs".to_string(),
            line_number: 42,
            context_before: None,
            context_after: Some(vec!["}".to_string()]),
            bounds: Bounds::new(0, 2),
            line: "fn main() {".to_string(),
        }
        .into();

        assert_eq!(line.tree, "core");
        assert_eq!(line.version, "abc123");
        assert_eq!(line.line_number, 42);
        assert!(line.context_before.is_empty());
        assert_eq!(line.context_after, vec!["}"]);
        assert_eq!(line.bounds, [0, 2]);
    }

    #[test]
    fn test_bounds_copied_verbatim() {
        let file: FileResult = proto::FileResult {
            bounds: Bounds::new(5, 5),
            ..Default::default()
        }
        .into();
        assert_eq!(file.bounds, [5, 5]);
    }

    #[test]
    fn test_tree_browse_url() {
        let tree: TreeResult = proto::TreeResult {
            name: "org/repo".to_string(),
            version: "v1.2".to_string(),
            bounds: Bounds::new(4, 8),
            metadata: proto::Metadata {
                labels: vec!["infra".to_string(), "go".to_string()],
                repository_base_url: "https://github.com/org/repo".to_string(),
            },
        }
        .into();

        assert_eq!(tree.metadata.external_url, "https://github.com/org/repo/tree/v1.2");
        assert_eq!(tree.metadata.labels, vec!["infra", "go"]);
        assert_eq!(tree.bounds, [4, 8]);
    }

    #[test]
    fn test_browse_url_is_plain_concatenation() {
        assert_eq!(browse_url("", "main"), "/tree/main");
        assert_eq!(browse_url("http://x/", "v"), "http://x//tree/v");
    }

    #[test]
    fn test_reply_from_backend_keeps_order_and_stats() {
        let payload = proto::CodeSearchResult {
            stats: proto::SearchStats {
                re2_time: 1,
                git_time: 2,
                sort_time: 3,
                index_time: 4,
                analyze_time: 5,
                exit_reason: ExitReason::Timeout,
            },
            results: vec![
                proto::SearchResult {
                    path: "b".to_string(),
                    ..Default::default()
                },
                proto::SearchResult {
                    path: "a".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let reply = SearchReply::from_backend(payload, SearchType::Normal, 17);
        let paths: Vec<_> = reply.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["b", "a"]);
        assert!(reply.file_results.is_empty());
        assert!(reply.tree_results.is_empty());
        assert_eq!(
            reply.info,
            Stats {
                re2_time: 1,
                git_time: 2,
                sort_time: 3,
                index_time: 4,
                analyze_time: 5,
                total_time: 17,
                exit_reason: "TIMEOUT".to_string(),
            }
        );
    }
}
