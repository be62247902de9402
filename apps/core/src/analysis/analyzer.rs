//! Response analyzer - combines the heuristic classifiers into one
//! [`VisibilityResult`] per (keyword, query, response) triple.
//!
//! Pure and synchronous: mention detection, sentiment, recommendation,
//! competitor scan, then the weighted score and tier.

use chrono::Utc;

use crate::models::{DataSource, VisibilityResult};

use super::intent::QueryIntent;
use super::sentiment::SentimentClassifier;
use super::visibility::VisibilityScorer;

/// Per-response orchestrator over the sentiment classifier and scorer.
pub struct ResponseAnalyzer {
    sentiment: SentimentClassifier,
    scorer: VisibilityScorer,
}

impl Default for ResponseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseAnalyzer {
    pub fn new() -> Self {
        Self {
            sentiment: SentimentClassifier::new(),
            scorer: VisibilityScorer::new(),
        }
    }

    /// Analyze one response text against the brand and its competitors.
    #[allow(clippy::too_many_arguments)]
    pub fn analyze(
        &self,
        keyword: &str,
        query: &str,
        intent: QueryIntent,
        response: &str,
        brand: &str,
        competitors: &[String],
        data_source: DataSource,
    ) -> VisibilityResult {
        let mention = self.scorer.analyze_mention(response, brand);
        let reading = self.sentiment.classify(response, brand);
        let competitor_mentions =
            self.scorer
                .competitor_mentions(response, mention.first_offset, competitors);
        let score = self.scorer.score(&mention, &reading);

        VisibilityResult {
            keyword: keyword.to_string(),
            query: query.to_string(),
            intent,
            brand_mentioned: mention.mentioned,
            prominent: mention.prominent,
            score,
            tier: self.scorer.tier(score),
            sentiment: reading.sentiment,
            recommendation: reading.recommendation,
            competitor_mentions,
            organic_rank: None,
            data_source,
            response_excerpt: VisibilityResult::excerpt_of(response),
            analyzed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sentiment::RecommendationLevel;
    use crate::analysis::visibility::VisibilityTier;

    fn analyze(response: &str) -> VisibilityResult {
        ResponseAnalyzer::new().analyze(
            "crm software",
            "What is the best crm software?",
            QueryIntent::Recommendation,
            response,
            "Acme",
            &["Globex".to_string()],
            DataSource::Live,
        )
    }

    #[test]
    fn test_recommended_brand_scores_high() {
        let result = analyze(
            "We recommend Acme as the best option for most teams. \
             It is a reliable, excellent tool. Globex is a distant second.",
        );

        assert!(result.brand_mentioned);
        assert!(result.prominent);
        assert_eq!(result.recommendation, RecommendationLevel::ExplicitlyRecommended);
        assert_eq!(result.score, 10);
        assert_eq!(result.tier, VisibilityTier::High);
        assert_eq!(result.competitor_mentions.len(), 1);
        assert!(!result.competitor_mentions[0].outranks_brand);
    }

    #[test]
    fn test_absent_brand_scores_zero() {
        let result = analyze("Globex is the leading tool in this category.");

        assert!(!result.brand_mentioned);
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, VisibilityTier::NotFound);
        assert_eq!(result.recommendation, RecommendationLevel::Absent);
        assert!(result.competitor_mentions[0].outranks_brand);
    }

    #[test]
    fn test_result_carries_inputs() {
        let result = analyze("Acme exists.");

        assert_eq!(result.keyword, "crm software");
        assert_eq!(result.query, "What is the best crm software?");
        assert_eq!(result.intent, QueryIntent::Recommendation);
        assert_eq!(result.data_source, DataSource::Live);
        assert_eq!(result.response_excerpt, "Acme exists.");
    }
}
