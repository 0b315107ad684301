use thiserror::Error;

/// Contract violations surfaced by the engine. These are programmer errors:
/// a malformed span would corrupt the resolver's non-overlap invariant, so it
/// is rejected instead of tolerated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskScanError {
    #[error("invalid span bounds: {start}..{end}")]
    InvalidSpanBounds { start: usize, end: usize },

    #[error("span length mismatch: range {start}..{end} vs matched text of {text_len} bytes")]
    SpanLengthMismatch {
        start: usize,
        end: usize,
        text_len: usize,
    },
}
