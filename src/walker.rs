//! Directory traversal and suffix filtering
//!
//! The walk is depth-first in directory-listing order: each sibling is
//! fully handled, recursion included, before the next one. Entries whose
//! name starts with a dot are skipped outright, directories included, so
//! nothing below a hidden directory is ever visited. Unreadable
//! subdirectories are recorded as failures without aborting the walk.

use std::collections::HashSet;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::models::{FileFailure, FileResult};
use crate::query::CompiledQuery;
use crate::rewrite::{self, FileOutcome};

/// Does a file name qualify under the allowed-extension set?
///
/// An empty set matches everything. Otherwise the name must carry an
/// extension (the component after the last dot) and that extension must be
/// a member, compared case-sensitively without the leading dot. A name
/// with no extension never matches a non-empty set.
pub fn suffix_matches(name: &str, suffixes: &HashSet<String>) -> bool {
    if suffixes.is_empty() {
        return true;
    }
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => suffixes.contains(ext),
        _ => false,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Walk `start`, scanning every qualifying file with the rewrite engine.
///
/// Returns matched files in traversal order and the failures encountered
/// along the way. Reported paths are relative to `root`, which must be a
/// prefix of `start`.
pub fn walk(
    query: &CompiledQuery,
    root: &Path,
    start: &Path,
) -> (Vec<FileResult>, Vec<FileFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    let entries = WalkDir::new(start)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| relative_display(root, p))
                    .unwrap_or_default();
                log::warn!("Cannot list {}: {}", path, e);
                failures.push(FileFailure {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if !suffix_matches(&entry.file_name().to_string_lossy(), &query.suffixes) {
            continue;
        }

        let rel = relative_display(root, entry.path());
        match rewrite::scan_file(query, entry.path(), &rel) {
            FileOutcome::Matched(file) => files.push(file),
            FileOutcome::NoMatch => {}
            FileOutcome::Failed { reason } => failures.push(FileFailure { path: rel, reason }),
        }
    }

    (files, failures)
}
