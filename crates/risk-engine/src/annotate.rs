//! Annotation application against a live document
//!
//! The document a scan ran against may have been re-rendered by the time
//! annotations are applied, so spans are re-located by content (snippet
//! first, matched keyword as fallback), never by stored offset. Marks never
//! nest: segments already inside a marker are excluded from the search.

use std::ops::Range;

use shared_types::{ApplyReport, ClearReport, Span};
use tracing::debug;

/// Default cap on markers applied per round
pub const MAX_ANNOTATIONS: usize = 50;

/// One text segment of the live document, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSegment {
    pub text: String,
    pub marked: bool,
}

/// Minimal surface the applier needs from a rendered document: enumerate
/// text segments in reading order, wrap an exact range of one segment with
/// a marker, and unwrap everything.
pub trait LiveDocument {
    /// One-time marker styling setup. Called once by the applier.
    fn install_marker_styles(&mut self);

    /// Snapshot of the text segments in reading order
    fn segments(&self) -> Vec<DocSegment>;

    /// Wrap `range` of segment `segment` with a marker. Returns false when
    /// the request is stale (bad index, already marked, range out of bounds).
    fn wrap(&mut self, segment: usize, range: Range<usize>) -> bool;

    /// Unwrap every marker, restoring plain text. Returns the count removed.
    fn clear_markers(&mut self) -> usize;
}

/// Applies and clears span markers on a live document. Requires exclusive
/// access to the document for the whole clear → apply round; the `&mut`
/// borrow enforces that structurally.
pub struct AnnotationApplier<'a, D: LiveDocument> {
    doc: &'a mut D,
    max_annotations: usize,
}

impl<'a, D: LiveDocument> AnnotationApplier<'a, D> {
    pub fn new(doc: &'a mut D) -> Self {
        Self::with_limit(doc, MAX_ANNOTATIONS)
    }

    pub fn with_limit(doc: &'a mut D, max_annotations: usize) -> Self {
        // Explicit one-time styling setup, instead of a hidden global flag
        doc.install_marker_styles();
        Self {
            doc,
            max_annotations,
        }
    }

    /// Remove every existing marker. Idempotent: with none present this
    /// removes 0.
    pub fn clear(&mut self) -> ClearReport {
        let removed = self.doc.clear_markers();
        debug!(removed, "cleared annotation markers");
        ClearReport { removed }
    }

    /// Re-locate each span in the live document and mark it, up to the
    /// configured maximum. A span whose snippet is gone from the document
    /// (re-render, dynamic content) falls back to its matched keyword text;
    /// if that misses too the span is skipped silently. The keyword fallback
    /// can land on an unrelated occurrence of a common word elsewhere in the
    /// document; that is the accepted precision tradeoff of content-based
    /// re-matching.
    pub fn apply(&mut self, spans: &[Span]) -> ApplyReport {
        let mut applied = 0;
        let mut skipped = 0;

        for span in spans {
            if applied >= self.max_annotations {
                break;
            }
            let needle = span.snippet.trim_matches('…');
            let needle = needle.trim();
            if self.mark_first(needle) || self.mark_first(&span.matched_text) {
                applied += 1;
            } else {
                skipped += 1;
            }
        }

        let capped = applied >= self.max_annotations;
        debug!(applied, skipped, capped, "applied annotation markers");
        ApplyReport { applied, capped }
    }

    /// Mark the first occurrence of `needle` across unmarked segments, in
    /// reading order. Takes a fresh segment snapshot because each wrap
    /// re-segments the document.
    fn mark_first(&mut self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        let segments = self.doc.segments();
        for (index, segment) in segments.iter().enumerate() {
            if segment.marked {
                continue;
            }
            if let Some(range) = find_ignore_ascii_case(&segment.text, needle) {
                return self.doc.wrap(index, range);
            }
        }
        false
    }
}

/// First ASCII-case-insensitive occurrence of `needle` in `haystack`,
/// as a byte range on char boundaries
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    for start in 0..=h.len() - n.len() {
        if !haystack.is_char_boundary(start) {
            continue;
        }
        let end = start + n.len();
        if haystack.is_char_boundary(end) && h[start..end].eq_ignore_ascii_case(n) {
            return Some(start..end);
        }
    }
    None
}

/// In-memory `LiveDocument`: an ordered list of text segments. Serves the
/// engine's tests and any host that renders plain text itself.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    segments: Vec<DocSegment>,
    styles_installed: bool,
}

impl MemoryDocument {
    pub fn new(text: &str) -> Self {
        Self::from_segments(vec![text.to_string()])
    }

    pub fn from_segments(texts: Vec<String>) -> Self {
        Self {
            segments: texts
                .into_iter()
                .map(|text| DocSegment {
                    text,
                    marked: false,
                })
                .collect(),
            styles_installed: false,
        }
    }

    /// Concatenated text content, ignoring marker state
    pub fn visible_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Text of every currently marked segment, in reading order
    pub fn marked_texts(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.marked)
            .map(|s| s.text.as_str())
            .collect()
    }

    pub fn styles_installed(&self) -> bool {
        self.styles_installed
    }
}

impl LiveDocument for MemoryDocument {
    fn install_marker_styles(&mut self) {
        self.styles_installed = true;
    }

    fn segments(&self) -> Vec<DocSegment> {
        self.segments.clone()
    }

    fn wrap(&mut self, segment: usize, range: Range<usize>) -> bool {
        let Some(seg) = self.segments.get(segment) else {
            return false;
        };
        if seg.marked
            || range.start >= range.end
            || range.end > seg.text.len()
            || !seg.text.is_char_boundary(range.start)
            || !seg.text.is_char_boundary(range.end)
        {
            return false;
        }

        let seg = self.segments.remove(segment);
        let mut replacement = Vec::with_capacity(3);
        let before = &seg.text[..range.start];
        if !before.is_empty() {
            replacement.push(DocSegment {
                text: before.to_string(),
                marked: false,
            });
        }
        replacement.push(DocSegment {
            text: seg.text[range.clone()].to_string(),
            marked: true,
        });
        let after = &seg.text[range.end..];
        if !after.is_empty() {
            replacement.push(DocSegment {
                text: after.to_string(),
                marked: false,
            });
        }
        self.segments.splice(segment..segment, replacement);
        true
    }

    fn clear_markers(&mut self) -> usize {
        let removed = self.segments.iter().filter(|s| s.marked).count();
        if removed == 0 {
            return 0;
        }
        // Unwrap and coalesce. Segment boundaries are not preserved, only
        // the text content is.
        let mut merged: Vec<DocSegment> = Vec::new();
        for seg in self.segments.drain(..) {
            match merged.last_mut() {
                Some(last) => last.text.push_str(&seg.text),
                None => merged.push(DocSegment {
                    text: seg.text,
                    marked: false,
                }),
            }
        }
        self.segments = merged;
        removed
    }
}
