//! End-to-end scenarios: scan -> resolve -> score -> annotate

use pretty_assertions::assert_eq;
use risk_engine::{
    build_summary_request, AnnotationApplier, MemoryDocument, RiskEngine,
    DEFAULT_SUMMARY_RISKS,
};
use shared_types::{RiskType, Severity};

#[test]
fn auto_renewal_with_price_and_cancellation_scores_high() {
    let text = "This agreement automatically renews for $9.99/month unless cancelled.";
    let result = RiskEngine::new().scan_text(text);

    let auto = result
        .spans
        .iter()
        .find(|s| s.risk == RiskType::AutoRenewal)
        .expect("auto-renewal span");
    assert_eq!(auto.matched_text, "automatically renews");

    let cancel = result
        .spans
        .iter()
        .find(|s| s.risk == RiskType::Cancellation)
        .expect("cancellation span");
    assert_eq!(cancel.matched_text, "cancelled");

    // auto-renewal +3 (price and cadence nearby) + cancellation +1
    assert_eq!(result.severity, Severity::High);
    // fees absent, cancellation present: priority rule 2
    let hero = result.hero.expect("hero line");
    assert!(hero.contains("ancellation"), "hero was: {hero}");
}

#[test]
fn sixty_fee_mentions_cap_at_fifty_and_annotate_capped() {
    let text: String = (0..60)
        .map(|i| format!("Fee schedule item {i}: a late fee applies to this line. "))
        .collect();
    let result = RiskEngine::new().scan_text(&text);

    assert_eq!(result.spans.len(), 50);
    assert!(result.spans.iter().all(|s| s.risk == RiskType::Fees));

    let mut doc = MemoryDocument::new(&text);
    let mut applier = AnnotationApplier::new(&mut doc);
    let report = applier.apply(&result.spans);

    assert_eq!(report.applied, 50);
    assert!(report.capped);
}

#[test]
fn scan_empty_document_is_all_low() {
    let result = RiskEngine::new().scan_text("");
    assert!(result.spans.is_empty());
    assert_eq!(result.severity, Severity::Low);
    assert_eq!(result.hero, None);
    assert_eq!(result.heatmap.level, Severity::Low);
    assert!(result.heatmap.counts.values().all(|&n| n == 0));
    assert!(result.heatmap.top_recipients.is_empty());
}

#[test]
fn apply_then_clear_restores_visible_text() {
    let text = "Your subscription renews automatically each month. A late fee applies \
                to missed payments. Disputes are resolved through binding arbitration. \
                We share usage data with our analytics partners.";
    let result = RiskEngine::new().scan_text(text);
    assert!(!result.spans.is_empty());

    let mut doc = MemoryDocument::new(text);
    let applied = {
        let mut applier = AnnotationApplier::new(&mut doc);
        applier.apply(&result.spans).applied
    };
    assert!(applied > 0);
    assert_eq!(doc.visible_text(), text, "marking never changes text content");

    let mut applier = AnnotationApplier::new(&mut doc);
    assert_eq!(applier.clear().removed, applied);
    assert_eq!(applier.clear().removed, 0);
    assert_eq!(doc.visible_text(), text);
}

#[test]
fn annotation_survives_document_drift() {
    let scanned = "Old layout. Your plan renews automatically on the first. Old footer.";
    let result = RiskEngine::new().scan_text(scanned);
    let spans = result.spans;
    assert!(!spans.is_empty());

    // Re-rendered document: sentences rewritten, keyword intact
    let live = "NEW HEADER >> plan renews automatically (see terms) << NEW FOOTER";
    let mut doc = MemoryDocument::new(live);
    let mut applier = AnnotationApplier::new(&mut doc);
    let report = applier.apply(&spans);

    assert_eq!(report.applied, 1);
    assert_eq!(doc.marked_texts(), vec!["renews automatically"]);
}

#[test]
fn data_sharing_text_fills_heatmap_and_recipients() {
    let text = "We share your data with advertising partners and may share logs with \
                analytics providers. We never sell data to brokers, but our marketing \
                partners and affiliates receive information from third parties.";
    let result = RiskEngine::new().scan_text(text);

    assert!(result.heatmap.counts["share"] >= 2);
    assert!(result.heatmap.counts["partner"] >= 2);
    assert!(result.heatmap.counts["third_party"] >= 1);
    assert!(!result.heatmap.top_recipients.is_empty());
    assert_eq!(
        result.heatmap.top_recipients[0].phrase,
        "advertising partners"
    );
}

#[test]
fn scan_result_serializes_for_the_ui() {
    let result = RiskEngine::new().scan_text("A late fee applies to this invoice.");
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"fees\""));
    assert!(json.contains("\"heatmap\""));
}

#[test]
fn summary_payload_follows_default_forward_policy() {
    let text = "A late fee applies after the due date. You may not cancel during the \
                first term. All claims go to binding arbitration, and any class action \
                is waived.";
    let result = RiskEngine::new().scan_text(text);

    assert!(result.spans.iter().any(|s| s.risk == RiskType::Arbitration));

    let request = build_summary_request("Service Terms", &result, &DEFAULT_SUMMARY_RISKS);
    assert_eq!(request.title, "Service Terms");
    assert!(!request.snippets.is_empty());
    assert!(request.detected_risks.contains(&RiskType::Fees));
    assert!(!request.detected_risks.contains(&RiskType::Arbitration));
    assert!(!request.detected_risks.contains(&RiskType::ClassAction));
}
