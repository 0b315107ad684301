pub mod types;

pub use types::{
    ApplyReport, ClearReport, Heatmap, RecipientMention, RiskType, ScanReport, ScanResult,
    ScannedDocument, Severity, Span, SummaryRequest, SummaryResponse,
};
