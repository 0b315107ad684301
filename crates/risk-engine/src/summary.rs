//! Assembly of the payload handed to the summarizer collaborator

use shared_types::{RiskType, ScanResult, SummaryRequest};

/// Risk categories forwarded to the summarizer by default. Arbitration and
/// class-action snippets are deliberately excluded from the AI-facing
/// payload; they are surfaced through the span list and severity instead.
pub const DEFAULT_SUMMARY_RISKS: [RiskType; 3] = [
    RiskType::Fees,
    RiskType::Cancellation,
    RiskType::AutoRenewal,
];

/// Build the `{title, snippets, detected_risks}` payload from a scan,
/// restricted to the caller-chosen risk subset. Snippets and risks are
/// de-duplicated, scan order preserved.
pub fn build_summary_request(
    title: &str,
    result: &ScanResult,
    risks: &[RiskType],
) -> SummaryRequest {
    let mut snippets: Vec<String> = Vec::new();
    let mut detected_risks: Vec<RiskType> = Vec::new();

    for span in &result.spans {
        if !risks.contains(&span.risk) {
            continue;
        }
        if !snippets.iter().any(|s| s == &span.snippet) {
            snippets.push(span.snippet.clone());
        }
        if !detected_risks.contains(&span.risk) {
            detected_risks.push(span.risk);
        }
    }

    SummaryRequest {
        title: title.to_string(),
        snippets,
        detected_risks,
    }
}
