//! Metrics aggregation over a run's visibility results.
//!
//! Reduces per-keyword results into tier counts, a 0-100 overall score,
//! competitor totals, and a competitive-risk bucket. The empty result set
//! is defined: all-zero counts, overall score 0, risk low.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::VisibilityResult;

use super::visibility::VisibilityTier;

/// Competitive displacement risk for the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Aggregated mentions for one competitor across a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorTotal {
    pub name: String,
    /// Total mentions across all analyzed responses.
    pub mentions: usize,
    /// Number of results where this competitor outranked the brand.
    pub outranked_in: usize,
}

/// Run-level summary produced by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilitySummary {
    pub total_keywords: usize,
    pub high_visibility: usize,
    pub low_visibility: usize,
    pub not_found: usize,
    /// Share of results mentioning the brand, 0-100.
    pub mention_rate: f32,
    /// Weighted score across all results, always within 0..=100.
    pub overall_score: u8,
    /// Share of results where some competitor outranks the brand, 0-100.
    pub outranked_share: f32,
    pub risk_level: RiskLevel,
    /// Per-competitor totals, sorted by mention count descending.
    pub competitor_totals: Vec<CompetitorTotal>,
}

impl VisibilitySummary {
    fn empty() -> Self {
        Self {
            total_keywords: 0,
            high_visibility: 0,
            low_visibility: 0,
            not_found: 0,
            mention_rate: 0.0,
            overall_score: 0,
            outranked_share: 0.0,
            risk_level: RiskLevel::Low,
            competitor_totals: vec![],
        }
    }
}

/// Maximum per-result score, the denominator for the overall percentage.
const MAX_RESULT_SCORE: f32 = 10.0;

// Risk thresholds on the outranked share.
const HIGH_RISK_SHARE: f32 = 30.0;
const MEDIUM_RISK_SHARE: f32 = 15.0;

/// Aggregates per-keyword results into a [`VisibilitySummary`].
pub struct MetricsAggregator;

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, results: &[VisibilityResult]) -> VisibilitySummary {
        if results.is_empty() {
            return VisibilitySummary::empty();
        }

        let total = results.len();
        let mut high_visibility = 0;
        let mut low_visibility = 0;
        let mut not_found = 0;
        let mut mentioned = 0;
        let mut outranked_results = 0;
        let mut score_sum: u32 = 0;
        let mut competitor_map: HashMap<String, CompetitorTotal> = HashMap::new();

        for result in results {
            match result.tier {
                VisibilityTier::High => high_visibility += 1,
                VisibilityTier::Low => low_visibility += 1,
                VisibilityTier::NotFound => not_found += 1,
            }
            if result.brand_mentioned {
                mentioned += 1;
            }
            score_sum += u32::from(result.score);

            let mut outranked_here = false;
            for mention in &result.competitor_mentions {
                let entry = competitor_map
                    .entry(mention.name.clone())
                    .or_insert_with(|| CompetitorTotal {
                        name: mention.name.clone(),
                        mentions: 0,
                        outranked_in: 0,
                    });
                entry.mentions += mention.mentions;
                if mention.outranks_brand {
                    entry.outranked_in += 1;
                    outranked_here = true;
                }
            }
            if outranked_here {
                outranked_results += 1;
            }
        }

        let total_f = total as f32;
        let mention_rate = mentioned as f32 / total_f * 100.0;
        let overall_score = (score_sum as f32 / (MAX_RESULT_SCORE * total_f) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8;
        let outranked_share = outranked_results as f32 / total_f * 100.0;

        let risk_level = if outranked_share > HIGH_RISK_SHARE {
            RiskLevel::High
        } else if outranked_share > MEDIUM_RISK_SHARE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let mut competitor_totals: Vec<CompetitorTotal> = competitor_map.into_values().collect();
        competitor_totals.sort_by(|a, b| b.mentions.cmp(&a.mentions).then(a.name.cmp(&b.name)));

        VisibilitySummary {
            total_keywords: total,
            high_visibility,
            low_visibility,
            not_found,
            mention_rate,
            overall_score,
            outranked_share,
            risk_level,
            competitor_totals,
        }
    }
}
