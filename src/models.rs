//! Core data models for Resweep
//!
//! These structures are the wire format exchanged with programmatic
//! consumers (the HTTP API and the `--json` CLI output), plus the byte-span
//! primitive shared by the line indexer and the match mapper.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` within a file's content.
///
/// The same representation is used for line boundaries and for regex match
/// occurrences, so overlap questions reduce to interval arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    /// Starting byte offset (inclusive)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if the two ranges share at least one byte.
    pub fn overlaps(&self, other: &ByteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One matching/rewrite request.
///
/// Constructed once per invocation and consumed synchronously. Every field
/// defaults to its zero value so callers may omit any of them; an empty
/// `match_pattern` turns the whole query into a no-op scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    /// Directory to scan, relative to the configured root ("" = the root)
    pub directory: String,
    /// Allowed file extensions, without the leading dot (empty = all files)
    pub file_suffixes: Vec<String>,
    /// Regex source applied to file content (empty = no-op scan)
    pub match_pattern: String,
    /// Substitution template; `$1`/`$name` expand to capture groups
    pub replacement: String,
    /// When true, matched files are rewritten in place on disk
    pub commit: bool,
}

/// One line touched by at least one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineResult {
    /// Line number within the file (0-indexed)
    pub line_number: usize,
    /// The line's original bytes, terminator included
    pub original_text: String,
    /// Single-line substitution preview. Present only when a non-empty
    /// replacement was requested. Not representative when a match crosses
    /// a line boundary; see the `rewrite` module docs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_text: Option<String>,
}

/// All touched lines of one matched file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// Path relative to the configured root
    pub path: String,
    /// Touched lines in ascending line-number order
    pub lines: Vec<LineResult>,
}

/// A file or directory the scan could not process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    /// Path relative to the configured root
    pub path: String,
    /// Human-readable description of the I/O failure
    pub reason: String,
}

/// The aggregated outcome of one query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResponse {
    /// Human-readable error message; empty string signals success
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// One entry per matched file, in traversal order
    pub files: Vec<FileResult>,
    /// Files and directories skipped because of I/O errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl QueryResponse {
    /// A response for a query that failed before any file was scanned.
    ///
    /// An error invalidates the batch: `files` is always empty here.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            files: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}
