//! Pattern bank: risk detectors plus auxiliary context patterns
//!
//! Detectors are data, not code branches. Each risk category owns one
//! compiled regex; adding a category means adding a table row, the finder
//! never changes. All patterns are case-insensitive and total over any
//! string input.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::RiskType;

/// Capability interface for span discovery. One implementation per pattern
/// descriptor; the finder only sees this.
pub trait Matcher {
    /// All non-overlapping matches as `(start, end, matched_text)` byte ranges
    fn find_all(&self, text: &str) -> Vec<(usize, usize, String)>;
}

/// A risk category bound to its compiled detector
pub struct RiskPattern {
    pub risk: RiskType,
    regex: &'static Regex,
}

impl Matcher for RiskPattern {
    fn find_all(&self, text: &str) -> Vec<(usize, usize, String)> {
        self.regex
            .find_iter(text)
            .map(|m| (m.start(), m.end(), m.as_str().to_string()))
            .collect()
    }
}

// ============================================================================
// Risk detectors
// ============================================================================

lazy_static! {
    static ref AUTO_RENEWAL: Regex = Regex::new(
        r"(?i)\b(?:auto[-\s]?renew(?:al|s|ed|ing)?|automatic(?:ally)?\s+renew(?:al|s|ed|ing)?|renews?\s+automatically|continuous\s+subscription)\b"
    )
    .unwrap();

    static ref CANCELLATION: Regex = Regex::new(
        r"(?i)\b(?:cancel(?:l?ation|l?ed|l?ing|s)?|non[-\s]?refundable|early\s+termination)\b"
    )
    .unwrap();

    static ref ARBITRATION: Regex = Regex::new(
        r"(?i)\b(?:binding\s+arbitration|arbitrat(?:ions|ion|ors|or|es|ed|e|ing))\b"
    )
    .unwrap();

    // A class-action mention alone is not a risk; it must be followed within
    // 80 characters by a waiver/prohibition term. Single pattern with a
    // bounded dot-all gap, never a two-pass search.
    static ref CLASS_ACTION: Regex = Regex::new(
        r"(?is)\bclass[-\s]actions?.{0,80}?(?:waiv(?:ers|er|es|ed|e|ing)|prohibit(?:ed|ions|ion|s)?|barred|bars?|not\s+(?:be\s+)?(?:permitted|allowed)|forfeit(?:s|ed)?|relinquish(?:es|ed)?)\b"
    )
    .unwrap();

    static ref FEES: Regex = Regex::new(
        r"(?i)\b(?:(?:late|hidden|additional|extra|service|processing|convenience|cancellation|termination|restocking|overdraft|maintenance|annual|monthly)\s+fees?|fees?\s+(?:may\s+)?appl(?:y|ies)|surcharges?|penalt(?:y|ies))\b"
    )
    .unwrap();

    static ref DATA_SHARING: Regex = Regex::new(
        r"(?i)\b(?:(?:share|sell|disclose|transfer)s?\s+(?:your\s+|personal\s+|user\s+)+(?:data|information)|third[-\s]part(?:y|ies)|data\s+(?:sharing|brokers?)|sell\s+(?:your\s+)?(?:data|information))\b"
    )
    .unwrap();

    static ref RISK_PATTERNS: Vec<RiskPattern> = vec![
        RiskPattern { risk: RiskType::AutoRenewal, regex: &*AUTO_RENEWAL },
        RiskPattern { risk: RiskType::Cancellation, regex: &*CANCELLATION },
        RiskPattern { risk: RiskType::Arbitration, regex: &*ARBITRATION },
        RiskPattern { risk: RiskType::ClassAction, regex: &*CLASS_ACTION },
        RiskPattern { risk: RiskType::Fees, regex: &*FEES },
        RiskPattern { risk: RiskType::DataSharing, regex: &*DATA_SHARING },
    ];
}

/// The detector table, in detection order
pub fn risk_patterns() -> &'static [RiskPattern] {
    RISK_PATTERNS.as_slice()
}

// ============================================================================
// Billing context (price / cadence near auto-renewal spans)
// ============================================================================

lazy_static! {
    static ref PRICE: Regex = Regex::new(
        r"(?i)[$€£]\s?\d+(?:[.,]\d{1,2})?|\b\d+(?:[.,]\d{1,2})?\s?(?:dollars|usd|eur|gbp)\b"
    )
    .unwrap();

    static ref CADENCE: Regex = Regex::new(
        r"(?i)\bper\s+(?:month|year|annum|week|day|billing\s+(?:cycle|period))\b|\b(?:monthly|annually|yearly|weekly|daily)\b|/\s?mo(?:nth)?\b|/\s?(?:yr|year)\b|\bevery\s+(?:month|year|week|\d+\s+(?:months|years|weeks|days))\b|\bbilling\s+(?:cycle|period)s?\b"
    )
    .unwrap();
}

pub fn price_pattern() -> &'static Regex {
    &PRICE
}

pub fn cadence_pattern() -> &'static Regex {
    &CADENCE
}

// ============================================================================
// Heatmap vocabulary buckets and recipient capture patterns
// ============================================================================

lazy_static! {
    static ref BUCKET_THIRD_PARTY: Regex = Regex::new(r"(?i)\bthird[-\s]+part(?:y|ies)\b").unwrap();
    static ref BUCKET_SHARE: Regex = Regex::new(r"(?i)\bshar(?:e|es|ed|ing)\b").unwrap();
    static ref BUCKET_SELL: Regex =
        Regex::new(r"(?i)\b(?:sell|sells|selling|sold|sales?)\b").unwrap();
    static ref BUCKET_AFFILIATE: Regex = Regex::new(r"(?i)\baffiliates?\b").unwrap();
    static ref BUCKET_PARTNER: Regex = Regex::new(r"(?i)\bpartners?(?:ships?)?\b").unwrap();
    static ref BUCKET_ADVERTISING: Regex =
        Regex::new(r"(?i)\b(?:advertis(?:ing|ements?|ers?|es|ed|e)|ad\s+networks?)\b").unwrap();
    static ref BUCKET_ANALYTICS: Regex = Regex::new(r"(?i)\banalytics\b").unwrap();

    static ref BUCKETS: Vec<(&'static str, &'static Regex)> = vec![
        ("third_party", &*BUCKET_THIRD_PARTY),
        ("share", &*BUCKET_SHARE),
        ("sell", &*BUCKET_SELL),
        ("affiliate", &*BUCKET_AFFILIATE),
        ("partner", &*BUCKET_PARTNER),
        ("advertising", &*BUCKET_ADVERTISING),
        ("analytics", &*BUCKET_ANALYTICS),
    ];

    // "shares/sells ... with/to <phrase>" and "our <words> partners".
    // The capture ends at punctuation, a coordinating word, or end of text,
    // so "advertising partners and may share logs..." yields just the phrase.
    static ref SHARE_RECIPIENT: Regex = Regex::new(
        r"(?i)\bshar(?:e|es|ed|ing)\b[^.;:!?\n]{0,40}?\b(?:with|to)\s+([^.,;:!?\n]{3,60}?)(?:[.,;:!?\n]|\s+(?:and|or|but|which|who|that)\b|$)"
    )
    .unwrap();
    static ref SELL_RECIPIENT: Regex = Regex::new(
        r"(?i)\b(?:sell|sells|selling|sold)\b[^.;:!?\n]{0,40}?\b(?:to|with)\s+([^.,;:!?\n]{3,60}?)(?:[.,;:!?\n]|\s+(?:and|or|but|which|who|that)\b|$)"
    )
    .unwrap();
    static ref OUR_PARTNERS: Regex =
        Regex::new(r"(?i)\bour\s+((?:[a-z][a-z-]*\s+){0,3}partners)\b").unwrap();

    static ref RECIPIENT_PATTERNS: Vec<&'static Regex> =
        vec![&*SHARE_RECIPIENT, &*SELL_RECIPIENT, &*OUR_PARTNERS];
}

/// Term-bucket name and pattern pairs for the heatmap aggregator
pub fn heatmap_buckets() -> &'static [(&'static str, &'static Regex)] {
    BUCKETS.as_slice()
}

/// Capture-group patterns whose group 1 is a sharing-recipient phrase
pub fn recipient_patterns() -> &'static [&'static Regex] {
    RECIPIENT_PATTERNS.as_slice()
}
