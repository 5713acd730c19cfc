//! Line boundary indexing over raw file content
//!
//! A line is a maximal run of bytes up to and including the next line feed,
//! or up to end-of-buffer when no terminator remains. The resulting spans
//! partition the buffer exactly: no gaps, no overlaps, strictly increasing
//! start offsets. This makes "which lines does this match touch" a pure
//! interval-overlap question for the match mapper.

use crate::models::ByteSpan;

/// Compute the ordered list of line spans covering `data`.
///
/// An empty buffer yields zero lines. Consecutive line feeds produce a line
/// holding only its terminator, and trailing bytes without a terminator
/// still form a final line.
pub fn line_spans(data: &[u8]) -> Vec<ByteSpan> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (offset, byte) in data.iter().enumerate() {
        if *byte == b'\n' {
            spans.push(ByteSpan::new(start, offset + 1));
            start = offset + 1;
        }
    }

    if start < data.len() {
        spans.push(ByteSpan::new(start, data.len()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Union covers `[0, len)`, pairwise disjoint, strictly increasing.
    fn assert_partitions(data: &[u8]) {
        let spans = line_spans(data);
        let mut expected_start = 0;
        for span in &spans {
            assert_eq!(span.start, expected_start, "gap or overlap in {:?}", spans);
            assert!(span.start < span.end, "empty or inverted span in {:?}", spans);
            expected_start = span.end;
        }
        assert_eq!(expected_start, data.len(), "spans do not cover the buffer");
    }

    #[test]
    fn test_empty_buffer_has_no_lines() {
        assert!(line_spans(b"").is_empty());
    }

    #[test]
    fn test_terminated_lines() {
        let spans = line_spans(b"abc\ndef\n");
        assert_eq!(spans, vec![ByteSpan::new(0, 4), ByteSpan::new(4, 8)]);
    }

    #[test]
    fn test_final_line_without_terminator() {
        let spans = line_spans(b"abc\ndef");
        assert_eq!(spans, vec![ByteSpan::new(0, 4), ByteSpan::new(4, 7)]);
    }

    #[test]
    fn test_consecutive_terminators_produce_empty_line() {
        let spans = line_spans(b"a\n\nb\n");
        assert_eq!(
            spans,
            vec![ByteSpan::new(0, 2), ByteSpan::new(2, 3), ByteSpan::new(3, 5)]
        );
        // The middle line holds nothing but its terminator
        assert_eq!(spans[1].len(), 1);
    }

    #[test]
    fn test_single_line_no_terminator() {
        assert_eq!(line_spans(b"abc"), vec![ByteSpan::new(0, 3)]);
    }

    #[test]
    fn test_only_terminators() {
        assert_eq!(
            line_spans(b"\n\n"),
            vec![ByteSpan::new(0, 1), ByteSpan::new(1, 2)]
        );
    }

    #[test]
    fn test_partition_property() {
        let buffers: &[&[u8]] = &[
            b"",
            b"\n",
            b"a",
            b"a\n",
            b"\na",
            b"abc\ndef\n",
            b"abc\ndef",
            b"\n\n\n",
            b"line one\n\nline three\nno terminator",
            &[0xff, 0xfe, b'\n', 0x00],
        ];
        for data in buffers {
            assert_partitions(data);
        }
    }
}
