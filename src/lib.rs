//! Resweep: regex search and rewrite over directory trees
//!
//! Resweep scans a directory tree for files matching a suffix filter,
//! finds regex matches inside their content, and reports or applies
//! line-level replacements. The engine is exposed over HTTP (a JSON query
//! endpoint plus a raw file viewer and static UI serving) and as a
//! one-shot CLI command.
//!
//! # Architecture
//!
//! - **Line index**: splits raw bytes into terminator-inclusive line spans
//!   that partition the content exactly
//! - **Match map**: a two-pointer sweep marking every line whose byte
//!   range intersects a regex match, multi-line matches included
//! - **Rewrite engine**: per-file read, early-exit, optional atomic
//!   in-place commit, and per-line result assembly with previews
//! - **Walker**: depth-first traversal skipping dot-hidden entries,
//!   filtering by file suffix, surfacing I/O failures without aborting
//! - **Query engine**: compiles one [`Query`](models::Query) and drives
//!   the pieces above into one [`QueryResponse`](models::QueryResponse)
//!
//! # Example Usage
//!
//! ```no_run
//! use resweep::{Query, QueryEngine};
//!
//! let engine = QueryEngine::new("/srv/data");
//! let response = engine.run(&Query {
//!     match_pattern: "v1".to_string(),
//!     replacement: "v2".to_string(),
//!     ..Query::default()
//! });
//!
//! println!("{} files matched", response.files.len());
//! ```

pub mod cli;
pub mod line_index;
pub mod match_map;
pub mod models;
pub mod output;
pub mod query;
pub mod rewrite;
pub mod walker;

// Re-export commonly used types
pub use models::{ByteSpan, FileFailure, FileResult, LineResult, Query, QueryResponse};
pub use query::{CompiledQuery, QueryEngine};
pub use rewrite::FileOutcome;
