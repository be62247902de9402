//! Brand mention detection, prominence, and visibility scoring.
//!
//! All checks are plain string/regex heuristics over the response text.
//! Scoring is a weighted sum over the detected signals, clamped to 0..=10.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::sentiment::{RecommendationLevel, Sentiment, SentimentReading};

/// Coarse visibility bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityTier {
    High,
    Low,
    NotFound,
}

impl VisibilityTier {
    pub fn label(&self) -> &'static str {
        match self {
            VisibilityTier::High => "high",
            VisibilityTier::Low => "low",
            VisibilityTier::NotFound => "not_found",
        }
    }
}

/// A competitor found in the response text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorMention {
    pub name: String,
    /// Number of times the competitor appears.
    pub mentions: usize,
    /// Whether the competitor appears before the brand, or appears while
    /// the brand is absent.
    pub outranks_brand: bool,
}

/// Where and how the brand appears in the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionAnalysis {
    pub mentioned: bool,
    /// Byte offset of the first mention, when present.
    pub first_offset: Option<usize>,
    /// Early mention or mention near a superlative phrase.
    pub prominent: bool,
}

static SUPERLATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(best|top|leading|#1|number one|first choice)\b")
        .expect("Invalid regex: superlative pattern")
});

/// Word-boundary matcher for a brand name, case-insensitive. The name is
/// escaped so punctuation in brand names stays literal.
pub fn mention_regex(brand: &str) -> Regex {
    let escaped = regex::escape(brand.trim());
    Regex::new(&format!(r"(?i)\b{escaped}\b")).expect("Invalid regex: escaped brand pattern")
}

// Score weights
const MENTION_BASE: i32 = 5;
const PROMINENCE_BONUS: i32 = 2;
const RECOMMENDATION_BONUS: i32 = 2;
const POSITIVE_BONUS: i32 = 1;
const NEGATIVE_PENALTY: i32 = 2;

/// Portion of the text counted as "early" for the prominence flag.
const EARLY_FRACTION: f32 = 0.25;
/// Max byte distance between a superlative and the brand mention.
const SUPERLATIVE_WINDOW: usize = 80;

const HIGH_TIER_MIN_SCORE: u8 = 7;

/// Heuristic scorer for one response.
pub struct VisibilityScorer;

impl Default for VisibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Locate the brand in the text and derive the prominence flag.
    pub fn analyze_mention(&self, text: &str, brand: &str) -> MentionAnalysis {
        if brand.trim().is_empty() || text.is_empty() {
            return MentionAnalysis {
                mentioned: false,
                first_offset: None,
                prominent: false,
            };
        }

        let first_offset = mention_regex(brand).find(text).map(|m| m.start());

        let prominent = match first_offset {
            Some(offset) => {
                let early_cutoff = (text.len() as f32 * EARLY_FRACTION) as usize;
                let in_first_sentence = !text[..offset].contains(['.', '!', '?']);
                let near_superlative = SUPERLATIVE_PATTERN.find_iter(text).any(|m| {
                    let distance = m.start().abs_diff(offset);
                    distance <= SUPERLATIVE_WINDOW
                });

                offset <= early_cutoff || in_first_sentence || near_superlative
            }
            None => false,
        };

        MentionAnalysis {
            mentioned: first_offset.is_some(),
            first_offset,
            prominent,
        }
    }

    /// Visibility score 0..=10 for one response.
    pub fn score(&self, mention: &MentionAnalysis, reading: &SentimentReading) -> u8 {
        if !mention.mentioned {
            return 0;
        }

        let mut score = MENTION_BASE;
        if mention.prominent {
            score += PROMINENCE_BONUS;
        }
        if reading.recommendation == RecommendationLevel::ExplicitlyRecommended {
            score += RECOMMENDATION_BONUS;
        }
        match reading.sentiment {
            Sentiment::Positive => score += POSITIVE_BONUS,
            Sentiment::Negative => score -= NEGATIVE_PENALTY,
            Sentiment::Neutral => {}
        }

        score.clamp(0, 10) as u8
    }

    /// Bucket a score into a tier.
    pub fn tier(&self, score: u8) -> VisibilityTier {
        if score >= HIGH_TIER_MIN_SCORE {
            VisibilityTier::High
        } else if score >= 1 {
            VisibilityTier::Low
        } else {
            VisibilityTier::NotFound
        }
    }

    /// Scan the text for each competitor, recording mention counts and
    /// whether the competitor outranks the brand.
    pub fn competitor_mentions(
        &self,
        text: &str,
        brand_offset: Option<usize>,
        competitors: &[String],
    ) -> Vec<CompetitorMention> {
        competitors
            .iter()
            .filter(|name| !name.trim().is_empty())
            .filter_map(|name| {
                let pattern = mention_regex(name);
                let first = pattern.find(text).map(|m| m.start())?;
                let mentions = pattern.find_iter(text).count();
                let outranks_brand = match brand_offset {
                    Some(brand_first) => first < brand_first,
                    None => true,
                };
                Some(CompetitorMention {
                    name: name.clone(),
                    mentions,
                    outranks_brand,
                })
            })
            .collect()
    }
}
