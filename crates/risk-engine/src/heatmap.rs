//! Data-sharing vocabulary heatmap
//!
//! Counts bucket terms over the whole text, independent of the resolved
//! spans; a sentence may count toward several buckets. Also extracts
//! "shares/sells to whom" recipient phrases.

use std::collections::HashMap;

use shared_types::{Heatmap, RecipientMention, Severity};

use crate::patterns::{heatmap_buckets, recipient_patterns};

// Fixed thresholds over the total across all buckets
const HIGH_TOTAL: usize = 15;
const MEDIUM_TOTAL: usize = 5;

/// Most recipients surfaced per scan
const MAX_RECIPIENTS: usize = 5;

pub fn build_heatmap(full_text: &str) -> Heatmap {
    let mut counts = std::collections::BTreeMap::new();
    let mut total = 0;

    for (name, pattern) in heatmap_buckets() {
        let n = pattern.find_iter(full_text).count();
        total += n;
        counts.insert((*name).to_string(), n);
    }

    let level = if total >= HIGH_TOTAL {
        Severity::High
    } else if total >= MEDIUM_TOTAL {
        Severity::Medium
    } else {
        Severity::Low
    };

    Heatmap {
        counts,
        level,
        top_recipients: top_recipients(full_text),
    }
}

/// Rank captured recipient phrases by count, ties broken by first encounter
fn top_recipients(full_text: &str) -> Vec<RecipientMention> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for pattern in recipient_patterns() {
        for cap in pattern.captures_iter(full_text) {
            let Some(m) = cap.get(1) else { continue };
            let phrase = normalize_phrase(m.as_str());
            if phrase.is_empty() {
                continue;
            }
            if !counts.contains_key(&phrase) {
                first_seen.push(phrase.clone());
            }
            *counts.entry(phrase).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<RecipientMention> = first_seen
        .into_iter()
        .map(|phrase| {
            let count = counts[&phrase];
            RecipientMention { phrase, count }
        })
        .collect();
    // Stable sort keeps first-encountered order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(MAX_RECIPIENTS);
    ranked
}

/// Lower-case, collapse whitespace, trim stray punctuation
fn normalize_phrase(raw: &str) -> String {
    let collapsed = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '"' | '\''))
        .to_string()
}
