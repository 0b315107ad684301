//! Sentence snippet extraction around detected spans
//!
//! Given a hit range, pull out the containing sentence for display. Sentence
//! boundaries are `.`/`!`/`?` followed by whitespace, searched inside a ±500
//! byte window; when boundary detection fails (abbreviation-heavy text), a
//! fixed ±250 window stands in. Output never exceeds 500 bytes plus the
//! ellipsis markers added at truncated ends.

use std::ops::Range;

const SEARCH_RADIUS: usize = 500;
const FALLBACK_RADIUS: usize = 250;
const MIN_SENTENCE_LEN: usize = 30;
const MAX_SNIPPET_LEN: usize = 500;
const ELLIPSIS: char = '…';

/// Extract the human-readable snippet for the hit at `start..end`.
///
/// Pure function over immutable input; safe to call concurrently across
/// spans. Non-empty for any valid span.
pub fn sentence_snippet(text: &str, start: usize, end: usize) -> String {
    debug_assert!(start < end && end <= text.len());

    let win_start = floor_boundary(text, start.saturating_sub(SEARCH_RADIUS));
    let win_end = ceil_boundary(text, end.saturating_add(SEARCH_RADIUS).min(text.len()));
    let window = &text[win_start..win_end];
    let sentence = containing_sentence(window, start - win_start, end - win_start);

    let raw = &window[sentence.clone()];
    let (candidate, hit_offset) = if raw.trim().len() >= MIN_SENTENCE_LEN {
        let lead = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let hit = (start - win_start - sentence.start).saturating_sub(lead);
        (trimmed.to_string(), hit.min(trimmed.len()))
    } else {
        // Boundary detection failed; fall back to a fixed window
        let fb_start = floor_boundary(text, start.saturating_sub(FALLBACK_RADIUS));
        let fb_end = ceil_boundary(text, end.saturating_add(FALLBACK_RADIUS).min(text.len()));
        let raw = &text[fb_start..fb_end];
        let lead = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let hit = (start - fb_start).saturating_sub(lead);
        (trimmed.to_string(), hit.min(trimmed.len()))
    };

    if candidate.is_empty() {
        // Whitespace-only surroundings; the matched text itself is the snippet
        return text[floor_boundary(text, start)..ceil_boundary(text, end)].to_string();
    }

    if candidate.len() > MAX_SNIPPET_LEN {
        truncate_centered(&candidate, hit_offset)
    } else {
        candidate
    }
}

/// Locate the sentence segment whose boundaries straddle `hit_start..hit_end`
/// within the window. A boundary is the position just after `.`/`!`/`?` when
/// the next character is whitespace or the window ends there.
fn containing_sentence(window: &str, hit_start: usize, hit_end: usize) -> Range<usize> {
    let mut sent_start = 0;
    let mut sent_end = window.len();

    for (i, c) in window.char_indices() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let after = i + c.len_utf8();
        let boundary = after >= window.len()
            || window[after..]
                .chars()
                .next()
                .is_some_and(|next| next.is_whitespace());
        if !boundary {
            continue;
        }
        if after <= hit_start {
            sent_start = after;
        } else if after >= hit_end && sent_end == window.len() {
            sent_end = after;
        }
    }

    sent_start..sent_end
}

/// Cut `candidate` down to ±250 bytes around the hit, marking truncated ends
fn truncate_centered(candidate: &str, hit: usize) -> String {
    let hit = hit.min(candidate.len());
    let from = floor_boundary(candidate, hit.saturating_sub(FALLBACK_RADIUS));
    let to = ceil_boundary(candidate, hit.saturating_add(FALLBACK_RADIUS).min(candidate.len()));

    let mut out = String::new();
    if from > 0 {
        out.push(ELLIPSIS);
    }
    out.push_str(candidate[from..to].trim());
    if to < candidate.len() {
        out.push(ELLIPSIS);
    }
    out
}

/// Largest char boundary at or below `i`
pub(crate) fn floor_boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary at or above `i`
pub(crate) fn ceil_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    let mut i = i;
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
