pub mod annotate;
pub mod error;
pub mod finder;
pub mod heatmap;
pub mod patterns;
pub mod resolver;
pub mod severity;
pub mod snippet;
pub mod summary;

use shared_types::{ScanReport, ScanResult, ScannedDocument};

pub use annotate::{AnnotationApplier, DocSegment, LiveDocument, MemoryDocument};
pub use error::RiskScanError;
pub use summary::{build_summary_request, DEFAULT_SUMMARY_RISKS};

/// Limits for one scan/annotation round
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ScanConfig {
    pub max_spans: usize,
    pub max_annotations: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_spans: resolver::MAX_SPANS,
            max_annotations: annotate::MAX_ANNOTATIONS,
        }
    }
}

/// RiskEngine entry point
pub struct RiskEngine {
    config: ScanConfig,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Scan raw text: find spans, resolve overlaps, score severity, pick the
    /// hero line, and aggregate the data-sharing heatmap. Total over any
    /// input; empty text yields an empty Low result.
    pub fn scan_text(&self, full_text: &str) -> ScanResult {
        let hits = finder::find_spans(full_text);
        tracing::debug!(hits = hits.len(), "raw spans found");

        let spans = resolver::resolve(hits, self.config.max_spans)
            .expect("span finder emits well-formed spans");
        let (severity, hero) = severity::score(&spans, full_text);
        let heatmap = heatmap::build_heatmap(full_text);

        ScanResult {
            spans,
            severity,
            hero,
            heatmap,
        }
    }

    /// Scan an extracted document and stamp the report
    pub fn scan_document(&self, document: &ScannedDocument) -> ScanReport {
        // Combine all pages into a single text for analysis
        let full_text = document.text_content.join("\n");

        ScanReport {
            document_id: document.id.clone(),
            result: self.scan_text(&full_text),
            scanned_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{RiskType, Severity};

    #[test]
    fn test_scan_empty_text_is_low_and_empty() {
        let engine = RiskEngine::new();
        let result = engine.scan_text("");
        assert!(result.spans.is_empty());
        assert_eq!(result.severity, Severity::Low);
        assert_eq!(result.hero, None);
        assert_eq!(result.heatmap.level, Severity::Low);
        assert!(result.heatmap.counts.values().all(|&n| n == 0));
    }

    #[test]
    fn test_scan_detects_multiple_risks() {
        let engine = RiskEngine::new();
        let text = "Late fees apply to overdue invoices. All disputes are settled by \
                    binding arbitration. We may share your data with third parties.";
        let result = engine.scan_text(text);

        assert!(result.spans.iter().any(|s| s.risk == RiskType::Fees));
        assert!(result.spans.iter().any(|s| s.risk == RiskType::Arbitration));
        assert!(result.spans.iter().any(|s| s.risk == RiskType::DataSharing));
    }

    #[test]
    fn test_scan_document_joins_pages() {
        let engine = RiskEngine::new();
        let document = ScannedDocument {
            id: "doc-7".to_string(),
            title: "Subscription Terms".to_string(),
            text_content: vec![
                "Page one talks about binding arbitration.".to_string(),
                "Page two mentions a late fee.".to_string(),
            ],
            created_at: 0,
        };
        let report = engine.scan_document(&document);

        assert_eq!(report.document_id, "doc-7");
        assert!(report
            .result
            .spans
            .iter()
            .any(|s| s.risk == RiskType::Arbitration));
        assert!(report.result.spans.iter().any(|s| s.risk == RiskType::Fees));
        assert!(report.scanned_at > 0);
    }

    #[test]
    fn test_custom_config_caps_spans() {
        let engine = RiskEngine::with_config(ScanConfig {
            max_spans: 2,
            max_annotations: 2,
        });
        let text = "A late fee applies. ".repeat(10);
        let result = engine.scan_text(&text);
        assert_eq!(result.spans.len(), 2);
    }
}
