use std::collections::BTreeMap;
use std::fmt;

/// Risk categories detected by the scanning engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    AutoRenewal,
    Cancellation,
    Arbitration,
    ClassAction,
    Fees,
    DataSharing,
}

impl RiskType {
    /// All categories, in detection order
    pub const ALL: [RiskType; 6] = [
        RiskType::AutoRenewal,
        RiskType::Cancellation,
        RiskType::Arbitration,
        RiskType::ClassAction,
        RiskType::Fees,
        RiskType::DataSharing,
    ];

    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            RiskType::AutoRenewal => "auto-renewal",
            RiskType::Cancellation => "cancellation",
            RiskType::Arbitration => "arbitration",
            RiskType::ClassAction => "class-action waiver",
            RiskType::Fees => "fees",
            RiskType::DataSharing => "data sharing",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-level rating used for both scan severity and heatmap level.
/// Ordered so that `High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A labeled half-open range in the scanned text.
///
/// `start`/`end` are byte offsets into the text the scan ran against;
/// `end - start == matched_text.len()` always holds. `snippet` is derived
/// display text and never authoritative for offsets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub risk: RiskType,
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
    pub snippet: String,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One ranked "shares/sells to whom" phrase from the heatmap aggregator
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecipientMention {
    pub phrase: String,
    pub count: usize,
}

/// Data-sharing vocabulary summary, independent of the resolved spans
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Heatmap {
    /// Term-bucket name -> occurrence count
    pub counts: BTreeMap<String, usize>,
    pub level: Severity,
    /// Top recipient phrases, count descending, at most 5
    pub top_recipients: Vec<RecipientMention>,
}

/// Terminal output of one scan invocation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScanResult {
    /// Resolved spans: sorted by `start`, pairwise non-overlapping, capped
    pub spans: Vec<Span>,
    pub severity: Severity,
    /// Single priority-selected warning line, if any risk warrants one
    pub hero: Option<String>,
    pub heatmap: Heatmap,
}

/// Document text as supplied by the extractor
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScannedDocument {
    pub id: String,
    pub title: String,
    pub text_content: Vec<String>, // Per-page text
    pub created_at: u64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScanReport {
    pub document_id: String,
    pub result: ScanResult,
    pub scanned_at: u64,
}

impl ScanReport {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Outcome of applying annotations to a live document
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplyReport {
    pub applied: usize,
    pub capped: bool,
}

/// Outcome of clearing annotations from a live document
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearReport {
    pub removed: usize,
}

/// Payload sent to the summarizer collaborator
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummaryRequest {
    pub title: String,
    pub snippets: Vec<String>,
    pub detected_risks: Vec<RiskType>,
}

/// Payload received from the summarizer collaborator
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SummaryResponse {
    pub bullets: Vec<String>,
}
