//! Keyword intent classification using regex patterns.
//!
//! Fast pattern-based intent detection for tracked keywords.
//! No ML model required - pure Rust regex matching over an ordered
//! decision list; the first matching category wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Intent category a tracked keyword falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// Brand-vs-brand comparison ("vs", "compare", "X or Y")
    Comparison,
    /// Review/opinion lookup ("review", "rating", "worth it")
    Review,
    /// Purchase intent ("buy", "order", "deal")
    Transactional,
    /// Price research ("price", "cost", "how much")
    Pricing,
    /// Location-bound search ("near me", "nearby", "in <city>")
    Local,
    /// Alternatives lookup ("alternative", "instead of")
    Alternative,
    /// Best-of / recommendation lookup ("best", "top", "recommend")
    Recommendation,
    /// Default category when nothing else matches
    Informational,
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl QueryIntent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            QueryIntent::Comparison => "comparison",
            QueryIntent::Review => "review",
            QueryIntent::Transactional => "transactional",
            QueryIntent::Pricing => "pricing",
            QueryIntent::Local => "local",
            QueryIntent::Alternative => "alternative",
            QueryIntent::Recommendation => "recommendation",
            QueryIntent::Informational => "informational",
        }
    }
}

// Compile patterns once at startup. Panicking on an invalid hardcoded
// pattern is acceptable: it is unrecoverable and caught by the test suite.
static COMPARISON_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bvs\.?\b").expect("Invalid regex: vs pattern"),
        Regex::new(r"(?i)\bversus\b").expect("Invalid regex: versus pattern"),
        Regex::new(r"(?i)\b(compare|compared|comparison)\b")
            .expect("Invalid regex: compare pattern"),
        Regex::new(r"(?i)\b(difference between|better than)\b")
            .expect("Invalid regex: difference pattern"),
        // "X or Y" only counts between capitalized tokens, so plain
        // informational phrasing is not swallowed by the comparison check.
        Regex::new(r"[A-Z][A-Za-z0-9]*\s+or\s+[A-Z]").expect("Invalid regex: brand-or pattern"),
    ]
});

static REVIEW_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(review|reviews|reviewed)\b").expect("Invalid regex: review pattern"),
        Regex::new(r"(?i)\b(rating|ratings|rated)\b").expect("Invalid regex: rating pattern"),
        Regex::new(r"(?i)\b(worth it|any good|legit|pros and cons)\b")
            .expect("Invalid regex: opinion pattern"),
        Regex::new(r"(?i)\b(testimonial|experience with)\b")
            .expect("Invalid regex: testimonial pattern"),
    ]
});

static TRANSACTIONAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(buy|buying|purchase)\b").expect("Invalid regex: buy pattern"),
        Regex::new(r"(?i)\b(order|ordering|shop for)\b").expect("Invalid regex: order pattern"),
        Regex::new(r"(?i)\b(deal|deals|discount|coupon|promo)\b")
            .expect("Invalid regex: deal pattern"),
        Regex::new(r"(?i)\b(sign up|subscribe|free trial)\b")
            .expect("Invalid regex: signup pattern"),
    ]
});

static PRICING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(price|prices|pricing)\b").expect("Invalid regex: price pattern"),
        Regex::new(r"(?i)\b(cost|costs|fee|fees)\b").expect("Invalid regex: cost pattern"),
        Regex::new(r"(?i)\bhow much\b").expect("Invalid regex: how-much pattern"),
        Regex::new(r"(?i)\b(cheap|cheapest|affordable|expensive)\b")
            .expect("Invalid regex: affordability pattern"),
    ]
});

static LOCAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bnear me\b").expect("Invalid regex: near-me pattern"),
        Regex::new(r"(?i)\b(nearby|closest|local)\b").expect("Invalid regex: nearby pattern"),
        // capitalized token after "in" so phrases like "trends in marketing"
        // stay informational
        Regex::new(r"\bin [A-Z][a-z]+").expect("Invalid regex: in-city pattern"),
        Regex::new(r"(?i)\b(open now|directions to)\b").expect("Invalid regex: open-now pattern"),
    ]
});

static ALTERNATIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(alternative|alternatives)\b")
            .expect("Invalid regex: alternative pattern"),
        Regex::new(r"(?i)\binstead of\b").expect("Invalid regex: instead-of pattern"),
        Regex::new(r"(?i)\b(similar to|like|replacement for)\b")
            .expect("Invalid regex: similar-to pattern"),
    ]
});

static RECOMMENDATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(best|top|leading)\b").expect("Invalid regex: best pattern"),
        Regex::new(r"(?i)\b(recommend|recommended|recommendation)\b")
            .expect("Invalid regex: recommend pattern"),
        Regex::new(r"(?i)\b(which|what).*(should i|to choose)\b")
            .expect("Invalid regex: which-should pattern"),
    ]
});

/// Pattern group for one intent category
struct IntentGroup {
    intent: QueryIntent,
    patterns: &'static LazyLock<Vec<Regex>>,
}

/// Keyword intent classifier using an ordered regex decision list.
///
/// Ties are resolved by check order: the earliest group with any match
/// wins, making classification fully deterministic.
pub struct IntentClassifier {
    groups: Vec<IntentGroup>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with all pattern groups, in priority order
    pub fn new() -> Self {
        let groups = vec![
            IntentGroup {
                intent: QueryIntent::Comparison,
                patterns: &COMPARISON_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Review,
                patterns: &REVIEW_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Transactional,
                patterns: &TRANSACTIONAL_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Pricing,
                patterns: &PRICING_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Local,
                patterns: &LOCAL_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Alternative,
                patterns: &ALTERNATIVE_PATTERNS,
            },
            IntentGroup {
                intent: QueryIntent::Recommendation,
                patterns: &RECOMMENDATION_PATTERNS,
            },
        ];

        Self { groups }
    }

    /// Classify the intent of a tracked keyword
    pub fn classify(&self, keyword: &str) -> QueryIntent {
        let keyword = keyword.trim();

        if keyword.is_empty() {
            return QueryIntent::Informational;
        }

        for group in &self.groups {
            if group.patterns.iter().any(|p| p.is_match(keyword)) {
                return group.intent;
            }
        }

        QueryIntent::Informational
    }
}
