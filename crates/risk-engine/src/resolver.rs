//! Span resolution: overlap merging, dedup, and the output cap
//!
//! Raw hits from the finder may overlap across categories ("cancellation
//! fee" hits both `cancellation` and `fees`). Resolution keeps the longest
//! span of each overlapping cluster so a reader sees one marker, not a pile.

use shared_types::Span;

use crate::error::RiskScanError;

/// Default cap on resolved spans per scan
pub const MAX_SPANS: usize = 50;

/// Merge overlapping spans and cap the result.
///
/// Spans are stable-sorted by `(start ascending, end descending)`, so among
/// equal starts the longer span sorts first, then walked with a single
/// accepted candidate: an overlapping follower survives only when strictly
/// longer, ties keep the earlier-sorted span. Overlap is closed at both ends
/// (`next.start <= current.end`), so spans that merely touch are merged too;
/// two markers that visually abut read as one anyway.
///
/// Returns `Err` for malformed input spans (`end <= start` or a range that
/// disagrees with `matched_text`); silently tolerating those would corrupt
/// the non-overlap invariant.
pub fn resolve(mut spans: Vec<Span>, max_count: usize) -> Result<Vec<Span>, RiskScanError> {
    for span in &spans {
        if span.end <= span.start {
            return Err(RiskScanError::InvalidSpanBounds {
                start: span.start,
                end: span.end,
            });
        }
        if span.end - span.start != span.matched_text.len() {
            return Err(RiskScanError::SpanLengthMismatch {
                start: span.start,
                end: span.end,
                text_len: span.matched_text.len(),
            });
        }
    }

    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut iter = spans.into_iter();
    let Some(mut current) = iter.next() else {
        return Ok(Vec::new());
    };

    let mut accepted = Vec::new();
    for next in iter {
        let overlaps = next.start <= current.end && next.end >= current.start;
        if overlaps {
            if next.len() > current.len() {
                current = next;
            }
        } else {
            accepted.push(current);
            current = next;
        }
    }
    accepted.push(current);

    accepted.truncate(max_count);
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::RiskType;

    fn span(risk: RiskType, start: usize, end: usize) -> Span {
        Span {
            risk,
            start,
            end,
            matched_text: "x".repeat(end.saturating_sub(start)),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_disjoint_spans_all_survive() {
        let spans = vec![
            span(RiskType::Fees, 30, 40),
            span(RiskType::Cancellation, 0, 10),
            span(RiskType::Arbitration, 15, 25),
        ];
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].start, 0);
        assert_eq!(resolved[1].start, 15);
        assert_eq!(resolved[2].start, 30);
    }

    #[test]
    fn test_equal_length_overlap_keeps_first_sorted() {
        // [10,20) and [15,25) overlap with equal length; the earlier start
        // sorts first and the tie keeps it
        let spans = vec![
            span(RiskType::Fees, 10, 20),
            span(RiskType::Cancellation, 15, 25),
        ];
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].risk, RiskType::Fees);
        assert_eq!((resolved[0].start, resolved[0].end), (10, 20));
    }

    #[test]
    fn test_longer_overlapping_span_wins() {
        let spans = vec![
            span(RiskType::Fees, 10, 18),
            span(RiskType::DataSharing, 12, 40),
        ];
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].risk, RiskType::DataSharing);
    }

    #[test]
    fn test_equal_start_prefers_longer() {
        let spans = vec![
            span(RiskType::Arbitration, 5, 12),
            span(RiskType::ClassAction, 5, 30),
        ];
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].risk, RiskType::ClassAction);
    }

    #[test]
    fn test_touching_spans_are_merged() {
        // Closed-interval comparison: [0,10) and [10,20) touch, so they merge
        let spans = vec![
            span(RiskType::Fees, 0, 10),
            span(RiskType::Cancellation, 10, 20),
        ];
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!((resolved[0].start, resolved[0].end), (0, 10));
    }

    #[test]
    fn test_cap_applies_after_merging() {
        let spans = (0..60).map(|i| span(RiskType::Fees, i * 20, i * 20 + 8)).collect();
        let resolved = resolve(spans, MAX_SPANS).unwrap();
        assert_eq!(resolved.len(), MAX_SPANS);
        assert_eq!(resolved[0].start, 0);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut bad = span(RiskType::Fees, 10, 20);
        bad.end = 5;
        let err = resolve(vec![bad], MAX_SPANS).unwrap_err();
        assert!(matches!(err, RiskScanError::InvalidSpanBounds { .. }));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut bad = span(RiskType::Fees, 10, 20);
        bad.matched_text = "too long for the range".to_string();
        let err = resolve(vec![bad], MAX_SPANS).unwrap_err();
        assert!(matches!(err, RiskScanError::SpanLengthMismatch { .. }));
    }
}
