//! Query compilation and execution
//!
//! [`QueryEngine`] is the synchronous core behind both the HTTP API and the
//! one-shot CLI: it compiles an incoming [`Query`] into a [`CompiledQuery`],
//! resolves the query directory strictly underneath the configured root,
//! drives the tree walk, and assembles one [`QueryResponse`].
//!
//! The engine holds no mutable state and never changes the process working
//! directory; the root travels as plain data through every call, so engines
//! are freely reentrant across sequential queries. Commit-mode queries
//! mutate files directly with no locking, so concurrent commits over
//! overlapping files must be serialized by the caller.
//!
//! Error policy: a malformed pattern or an invalid query directory fails
//! the whole query (`error` set, `files` empty, nothing scanned); I/O
//! trouble on individual files or subdirectories is recorded in `failures`
//! while the scan carries on.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use regex::bytes::Regex;

use crate::models::{Query, QueryResponse};
use crate::walker;

/// A [`Query`] compiled into its executable form.
pub struct CompiledQuery {
    /// Allowed extensions, without the leading dot (empty = all)
    pub suffixes: HashSet<String>,
    /// Content pattern, matched over raw bytes
    pub pattern: Regex,
    /// Replacement template bytes, `$`-expanded per match
    pub replacement: Vec<u8>,
    /// Effective commit flag; never set with an empty replacement
    pub commit: bool,
}

/// Executes queries against a configured root directory.
pub struct QueryEngine {
    root: PathBuf,
}

impl QueryEngine {
    /// Create an engine rooted at `root`. The caller is responsible for
    /// having validated that `root` is a readable directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one query start-to-finish and return its response.
    pub fn run(&self, query: &Query) -> QueryResponse {
        // An unset pattern means a no-op scan: nothing is read, nothing
        // matches, nothing is rewritten.
        if query.match_pattern.is_empty() {
            return QueryResponse::default();
        }

        let pattern = match Regex::new(&query.match_pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                log::debug!("Rejecting malformed pattern {:?}", query.match_pattern);
                return QueryResponse::failure(e.to_string());
            }
        };

        let start = match resolve_under_root(&self.root, &query.directory) {
            Ok(start) => start,
            Err(reason) => return QueryResponse::failure(reason),
        };

        // An empty replacement never commits; the query downgrades to a
        // preview.
        let commit = query.commit && !query.replacement.is_empty();
        if query.commit && !commit {
            log::warn!("Commit requested with an empty replacement; previewing only");
        }

        let compiled = CompiledQuery {
            suffixes: query.file_suffixes.iter().cloned().collect(),
            pattern,
            replacement: query.replacement.clone().into_bytes(),
            commit,
        };

        log::info!(
            "Scanning {:?} (pattern={:?}, suffixes={:?}, commit={})",
            start,
            query.match_pattern,
            query.file_suffixes,
            commit
        );

        let (files, failures) = walker::walk(&compiled, &self.root, &start);
        log::info!(
            "Scan finished: {} matched files, {} failures",
            files.len(),
            failures.len()
        );

        QueryResponse {
            error: String::new(),
            files,
            failures,
        }
    }
}

/// Join a request-supplied relative directory onto the root, refusing
/// anything that could escape it. An empty string means the root itself.
fn resolve_under_root(root: &Path, directory: &str) -> Result<PathBuf, String> {
    let relative = Path::new(directory);
    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(format!("invalid directory {:?}", directory));
            }
        }
    }

    let start = root.join(relative);
    if !start.is_dir() {
        return Err(format!("{:?} is not a directory under the root", directory));
    }
    Ok(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn query(pattern: &str) -> Query {
        Query {
            match_pattern: pattern.to_string(),
            ..Query::default()
        }
    }

    #[test]
    fn test_empty_pattern_is_a_noop_scan() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "anything\n").unwrap();

        let response = QueryEngine::new(dir.path()).run(&Query::default());
        assert!(response.is_success());
        assert!(response.files.is_empty());
        assert!(response.failures.is_empty());
    }

    #[test]
    fn test_malformed_pattern_fails_the_whole_query() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc\n").unwrap();

        let response = QueryEngine::new(dir.path()).run(&query("a[unclosed"));
        assert!(!response.is_success());
        assert!(response.files.is_empty());
    }

    #[test]
    fn test_scan_finds_matches_under_the_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc\ndef\n").unwrap();

        let response = QueryEngine::new(dir.path()).run(&query("b"));
        assert!(response.is_success());
        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].lines[0].original_text, "abc\n");
    }

    #[test]
    fn test_subdirectory_scope_limits_the_scan() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();
        fs::write(dir.path().join("outer.txt"), "needle\n").unwrap();
        fs::write(dir.path().join("inner/in.txt"), "needle\n").unwrap();

        let mut q = query("needle");
        q.directory = "inner".to_string();
        let response = QueryEngine::new(dir.path()).run(&q);
        let paths: Vec<&str> = response.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["inner/in.txt"]);
    }

    #[test]
    fn test_parent_escape_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();

        let engine = QueryEngine::new(dir.path().join("data"));
        let mut q = query("x");
        q.directory = "../".to_string();
        let response = engine.run(&q);
        assert!(!response.is_success());
        assert!(response.files.is_empty());
    }

    #[test]
    fn test_missing_query_directory_fails_the_query() {
        let dir = TempDir::new().unwrap();

        let mut q = query("x");
        q.directory = "no-such-dir".to_string();
        let response = QueryEngine::new(dir.path()).run(&q);
        assert!(!response.is_success());
    }

    #[test]
    fn test_commit_with_empty_replacement_previews_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc\n").unwrap();

        let mut q = query("abc");
        q.commit = true;
        let response = QueryEngine::new(dir.path()).run(&q);
        assert!(response.is_success());
        assert_eq!(response.files.len(), 1);
        // File untouched, and no rewritten preview was produced
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "abc\n");
        assert_eq!(response.files[0].lines[0].rewritten_text, None);
    }

    #[test]
    fn test_commit_applies_replacement_across_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc\n").unwrap();
        fs::write(dir.path().join("b.txt"), "no hit\n").unwrap();

        let mut q = query("abc");
        q.replacement = "xyz".to_string();
        q.commit = true;
        let response = QueryEngine::new(dir.path()).run(&q);
        assert_eq!(response.files.len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "xyz\n");
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "no hit\n");
        assert_eq!(
            response.files[0].lines[0].rewritten_text.as_deref(),
            Some("xyz\n")
        );
    }
}
