//! Per-file match scanning and rewrite application
//!
//! For each qualifying file the engine reads the content once, bails out
//! early when the pattern matches nothing, optionally commits the global
//! substitution back to disk, and then assembles one [`LineResult`] per
//! touched line of the content it read.
//!
//! Line spans and match spans are always computed over the pre-commit
//! content, so the reported previews mirror what the write produced.
//!
//! # Preview limitation
//!
//! The `rewritten_text` preview applies the substitution to a single line's
//! bytes in isolation. When a match crosses a line boundary, the per-line
//! preview cannot reproduce it and the line is reported with its original
//! text unchanged; the committed file content is still correct. Callers
//! that need the exact post-commit bytes should fetch the file again.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::line_index::line_spans;
use crate::match_map::touched_lines;
use crate::models::{ByteSpan, FileResult, LineResult};
use crate::query::CompiledQuery;

/// What happened to one file during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The pattern matched; line results are populated.
    Matched(FileResult),
    /// The pattern matched nothing in this file.
    NoMatch,
    /// The file could not be read or written back.
    Failed { reason: String },
}

/// Scan one file, committing the substitution first when requested.
///
/// `rel_path` is the root-relative path reported in the result; `abs_path`
/// is where the bytes actually live.
pub fn scan_file(query: &CompiledQuery, abs_path: &Path, rel_path: &str) -> FileOutcome {
    let data = match fs::read(abs_path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Skipping {}: {}", rel_path, e);
            return FileOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if !query.pattern.is_match(&data) {
        return FileOutcome::NoMatch;
    }

    if query.commit {
        let rewritten = query.pattern.replace_all(&data, query.replacement.as_slice());
        if let Err(e) = atomic_write(abs_path, &rewritten) {
            log::warn!("Failed to rewrite {}: {}", rel_path, e);
            return FileOutcome::Failed {
                reason: format!("rewrite failed: {}", e),
            };
        }
        log::info!("Rewrote {} ({} -> {} bytes)", rel_path, data.len(), rewritten.len());
    }

    let matches: Vec<ByteSpan> = query
        .pattern
        .find_iter(&data)
        .map(|m| ByteSpan::new(m.start(), m.end()))
        .collect();
    let lines = line_spans(&data);
    let touched = touched_lines(&lines, &matches);

    let mut results = Vec::new();
    for (number, span) in lines.iter().enumerate() {
        if !touched[number] {
            continue;
        }
        let line_bytes = &data[span.start..span.end];
        let rewritten_text = if query.replacement.is_empty() {
            None
        } else {
            let replaced = query
                .pattern
                .replace_all(line_bytes, query.replacement.as_slice());
            Some(String::from_utf8_lossy(&replaced).into_owned())
        };
        results.push(LineResult {
            line_number: number,
            original_text: String::from_utf8_lossy(line_bytes).into_owned(),
            rewritten_text,
        });
    }

    FileOutcome::Matched(FileResult {
        path: rel_path.to_string(),
        lines: results,
    })
}

/// Replace a file's content via a temp file in the same directory plus an
/// atomic rename, so a crash mid-write leaves the original intact.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent directory")
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
