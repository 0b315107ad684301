//! Severity scoring and hero-line selection over the resolved span set

use shared_types::{RiskType, Severity, Span};

use crate::patterns::{cadence_pattern, price_pattern};
use crate::snippet::{ceil_boundary, floor_boundary};

/// How far around an auto-renewal span to look for price/cadence terms
const CONTEXT_RADIUS: usize = 160;

const HIGH_SCORE: u32 = 4;
const MEDIUM_SCORE: u32 = 2;

const FEES_HERO: &str = "Extra fees detected. Review the fee language before you agree.";
const CANCELLATION_HERO: &str =
    "Cancellation terms detected. Check how and when you can cancel.";
const AUTO_RENEWAL_HERO: &str =
    "This agreement renews automatically. Cancel before the renewal date to avoid charges.";

/// Score the resolved spans into a three-level severity and pick the hero
/// warning line. Weights are fixed: auto-renewal +3 with billing context
/// nearby (+2 without, counted once for the first span), arbitration +3,
/// class-action +2, cancellation +1, fees +1.
pub fn score(resolved: &[Span], full_text: &str) -> (Severity, Option<String>) {
    let mut score = 0;

    if let Some(auto) = first_of(resolved, RiskType::AutoRenewal) {
        score += if billing_context(full_text, auto).is_some() {
            3
        } else {
            2
        };
    }
    if has(resolved, RiskType::Arbitration) {
        score += 3;
    }
    if has(resolved, RiskType::ClassAction) {
        score += 2;
    }
    if has(resolved, RiskType::Cancellation) {
        score += 1;
    }
    if has(resolved, RiskType::Fees) {
        score += 1;
    }

    let severity = if score >= HIGH_SCORE {
        Severity::High
    } else if score >= MEDIUM_SCORE {
        Severity::Medium
    } else {
        Severity::Low
    };

    (severity, hero(resolved, full_text))
}

/// Priority-ordered hero selection, independent of the numeric score:
/// fees, then cancellation, then auto-renewal (with billing context
/// interpolated when found), else nothing.
fn hero(resolved: &[Span], full_text: &str) -> Option<String> {
    if has(resolved, RiskType::Fees) {
        return Some(FEES_HERO.to_string());
    }
    if has(resolved, RiskType::Cancellation) {
        return Some(CANCELLATION_HERO.to_string());
    }
    if let Some(auto) = first_of(resolved, RiskType::AutoRenewal) {
        return Some(match billing_context(full_text, auto) {
            Some(context) => format!(
                "This agreement renews automatically at {}. Cancel before the renewal date to avoid charges.",
                context
            ),
            None => AUTO_RENEWAL_HERO.to_string(),
        });
    }
    None
}

fn has(spans: &[Span], risk: RiskType) -> bool {
    spans.iter().any(|s| s.risk == risk)
}

fn first_of(spans: &[Span], risk: RiskType) -> Option<&Span> {
    spans.iter().find(|s| s.risk == risk)
}

/// Price and/or cadence wording near the span, rendered for interpolation
fn billing_context(full_text: &str, span: &Span) -> Option<String> {
    let from = floor_boundary(full_text, span.start.saturating_sub(CONTEXT_RADIUS));
    let to = ceil_boundary(
        full_text,
        span.end.saturating_add(CONTEXT_RADIUS).min(full_text.len()),
    );
    let window = &full_text[from..to];

    let price = price_pattern().find(window).map(|m| m.as_str().trim().to_string());
    let cadence = cadence_pattern().find(window).map(|m| m.as_str().trim().to_string());

    match (price, cadence) {
        (None, None) => None,
        (Some(price), None) => Some(price),
        (None, Some(cadence)) => Some(cadence),
        (Some(price), Some(cadence)) => {
            if cadence.starts_with('/') {
                Some(format!("{}{}", price, cadence))
            } else {
                Some(format!("{} {}", price, cadence))
            }
        }
    }
}
