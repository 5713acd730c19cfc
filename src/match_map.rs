//! Mapping regex match spans onto line spans
//!
//! Given the ordered line spans of a file and the ordered, non-overlapping
//! match spans the regex engine produced, this module decides which lines
//! are touched: a line is touched when its byte range intersects at least
//! one match's byte range. A match spanning several lines touches every one
//! of them; a line holding several matches is touched once (membership is
//! boolean, not a count).
//!
//! The sweep advances a cursor through each list in a single pass, so the
//! cost is O(lines + matches) regardless of how the intervals interleave.

use crate::models::ByteSpan;

/// Mark the lines touched by at least one match.
///
/// Both slices must be sorted by start offset; `lines` must be a partition
/// (as produced by [`crate::line_index::line_spans`]) and `matches` must be
/// mutually non-overlapping (as produced by a regex engine's left-to-right
/// match iteration).
pub fn touched_lines(lines: &[ByteSpan], matches: &[ByteSpan]) -> Vec<bool> {
    let mut touched = vec![false; lines.len()];

    let mut line = 0;
    let mut mat = 0;
    while line < lines.len() && mat < matches.len() {
        let lr = lines[line];
        let mr = matches[mat];

        if mr.start < lr.start {
            // Match starts before the line starts.
            if mr.end <= lr.start {
                // Match ends before the line begins; it belonged to an
                // earlier line.
                mat += 1;
            } else if mr.end <= lr.end {
                // Match overlaps the start of the line and ends inside it:
                // its tail is consumed here, so both cursors advance.
                touched[line] = true;
                line += 1;
                mat += 1;
            } else {
                // Line is wholly contained in the match, which keeps going;
                // only the line cursor advances.
                touched[line] = true;
                line += 1;
            }
        } else if mr.start < lr.end {
            // Match starts inside the line.
            touched[line] = true;
            if mr.end <= lr.end {
                // Match is contained in the line.
                mat += 1;
            }
            line += 1;
        } else {
            // Match begins at or after the line's end.
            line += 1;
        }
    }

    touched
}
