use shared_types::Span;

use crate::patterns::{risk_patterns, Matcher};
use crate::snippet;

/// Run every detector in the pattern bank over `full_text` and collect raw
/// spans, one batch per category, concatenated in bank order. No cap at this
/// stage; the resolver enforces the output bound. Pure and deterministic.
pub fn find_spans(full_text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    if full_text.is_empty() {
        return spans;
    }

    for pattern in risk_patterns() {
        for (start, end, matched_text) in pattern.find_all(full_text) {
            let snippet = snippet::sentence_snippet(full_text, start, end);
            spans.push(Span {
                risk: pattern.risk,
                start,
                end,
                matched_text,
                snippet,
            });
        }
    }

    spans
}
