//! Sentiment and recommendation classification for AI response text.
//!
//! Two fixed ordered lists of regex phrase patterns (positive cues,
//! negative cues) are matched against the response; sentiment is whichever
//! side has strictly more matches, else neutral. An independent pattern
//! list, with the brand name interpolated, flags explicitly-recommended
//! phrasing. No learning, no configurable thresholds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::visibility::mention_regex;

/// Sentiment of a response toward the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// How strongly the response endorses the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    /// The response contains explicit recommendation phrasing for the brand.
    ExplicitlyRecommended,
    /// The brand appears but is not explicitly recommended.
    Mentioned,
    /// The brand does not appear at all.
    Absent,
}

impl RecommendationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationLevel::ExplicitlyRecommended => "explicitly_recommended",
            RecommendationLevel::Mentioned => "mentioned",
            RecommendationLevel::Absent => "absent",
        }
    }
}

/// Result of sentiment classification for one (text, brand) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReading {
    pub sentiment: Sentiment,
    pub recommendation: RecommendationLevel,
    /// Number of positive cue patterns that matched.
    pub positive_matches: usize,
    /// Number of negative cue patterns that matched.
    pub negative_matches: usize,
}

static POSITIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(excellent|outstanding|impressive)\b")
            .expect("Invalid regex: excellent pattern"),
        Regex::new(r"(?i)\b(great|solid|strong) (choice|option|pick)\b")
            .expect("Invalid regex: great-choice pattern"),
        Regex::new(r"(?i)\b(highly rated|top-rated|well regarded|well-regarded)\b")
            .expect("Invalid regex: rated pattern"),
        Regex::new(r"(?i)\b(reliable|trusted|popular|leading)\b")
            .expect("Invalid regex: reliable pattern"),
        Regex::new(r"(?i)\bstands? out\b").expect("Invalid regex: stands-out pattern"),
        Regex::new(r"(?i)\b(loved|praised|favorite) by\b").expect("Invalid regex: loved-by pattern"),
        Regex::new(r"(?i)\bone of the best\b").expect("Invalid regex: one-of-best pattern"),
    ]
});

static NEGATIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(avoid|steer clear)\b").expect("Invalid regex: avoid pattern"),
        Regex::new(r"(?i)\b(poor|disappointing|underwhelming)\b")
            .expect("Invalid regex: poor pattern"),
        Regex::new(r"(?i)\b(complaints?|issues?|problems?) (with|about)\b")
            .expect("Invalid regex: complaints pattern"),
        Regex::new(r"(?i)\b(unreliable|overpriced|outdated)\b")
            .expect("Invalid regex: unreliable pattern"),
        Regex::new(r"(?i)\bfalls? short\b").expect("Invalid regex: falls-short pattern"),
        Regex::new(r"(?i)\bnot (recommended|worth it|a good fit)\b")
            .expect("Invalid regex: not-recommended pattern"),
        Regex::new(r"(?i)\b(worse|weaker) than\b").expect("Invalid regex: worse-than pattern"),
    ]
});

/// Heuristic sentiment and recommendation classifier.
pub struct SentimentClassifier;

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a response toward a brand. Deterministic for a fixed
    /// (text, brand) pair.
    pub fn classify(&self, text: &str, brand: &str) -> SentimentReading {
        let positive_matches = POSITIVE_PATTERNS.iter().filter(|p| p.is_match(text)).count();
        let negative_matches = NEGATIVE_PATTERNS.iter().filter(|p| p.is_match(text)).count();

        let sentiment = if positive_matches > negative_matches {
            Sentiment::Positive
        } else if negative_matches > positive_matches {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        let recommendation = self.classify_recommendation(text, brand);

        SentimentReading {
            sentiment,
            recommendation,
            positive_matches,
            negative_matches,
        }
    }

    /// Check the explicit-recommendation patterns for the brand; fall back
    /// to plain mention detection.
    fn classify_recommendation(&self, text: &str, brand: &str) -> RecommendationLevel {
        if brand.trim().is_empty() {
            return RecommendationLevel::Absent;
        }

        for pattern in recommendation_patterns(brand) {
            if pattern.is_match(text) {
                return RecommendationLevel::ExplicitlyRecommended;
            }
        }

        if mention_regex(brand).is_match(text) {
            RecommendationLevel::Mentioned
        } else {
            RecommendationLevel::Absent
        }
    }
}

/// Build the explicit-recommendation patterns with the brand name
/// interpolated. The brand is regex-escaped, so names with punctuation
/// (e.g. "C&A") stay literal.
fn recommendation_patterns(brand: &str) -> Vec<Regex> {
    let b = regex::escape(brand.trim());
    let sources = [
        format!(r"(?i)\b(?:we|i)(?:'d| would)?\s+(?:highly\s+)?recommend\s+(?:using\s+)?{b}\b"),
        format!(r"(?i)\b{b}\s+is\s+(?:the\s+best|a\s+great\s+choice|an?\s+excellent\s+(?:choice|option))\b"),
        format!(r"(?i)\b{b}\s+stands\s+out\b"),
        format!(r"(?i)\bgo\s+with\s+{b}\b"),
        format!(r"(?i)\b(?:top|best)\s+(?:pick|choice|option)\s+is\s+{b}\b"),
        format!(r"(?i)\byou\s+(?:should|can't go wrong with)\s+(?:try|choose|use)?\s*{b}\b"),
    ];

    sources
        .iter()
        .filter_map(|s| Regex::new(s).ok())
        .collect()
}
