//! Core data model for visibility analysis runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::analysis::intent::QueryIntent;
use crate::analysis::sentiment::{RecommendationLevel, Sentiment};
use crate::analysis::visibility::{CompetitorMention, VisibilityTier};

/// User-entered brand profile. Created once per run from a JSON file and
/// validated before any analysis starts.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Brand name as it should be matched in response text.
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Industry or product category, used as the `{category}` fallback.
    #[validate(length(min = 1, max = 100))]
    pub industry: String,

    /// Search terms to track. At least one is required.
    #[validate(length(min = 1, max = 50), custom(function = validate_keywords))]
    pub keywords: Vec<String>,

    /// Competitor brand names scanned for in responses.
    #[serde(default)]
    pub competitors: Vec<String>,

    /// Optional location used for local-intent queries.
    #[serde(default)]
    pub location: Option<String>,

    /// Optional contact address, carried through from the intake form.
    #[validate(email)]
    #[serde(default)]
    pub contact_email: Option<String>,
}

fn validate_keywords(keywords: &[String]) -> Result<(), ValidationError> {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ValidationError::new("empty_keyword"));
    }
    Ok(())
}

/// Flavor of the simulated search surface a query is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchContext {
    /// Conversational AI assistant (ChatGPT-style phrasing).
    #[default]
    AiChat,
    /// Voice assistant (spoken, question-first phrasing).
    Voice,
    /// Traditional search engine (terse keyword phrasing).
    Traditional,
}

impl SearchContext {
    pub fn label(&self) -> &'static str {
        match self {
            SearchContext::AiChat => "ai_chat",
            SearchContext::Voice => "voice",
            SearchContext::Traditional => "traditional",
        }
    }
}

/// Where the analyzed response text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// A live completion from the configured provider.
    Live,
    /// Locally generated mock data (missing key or failed call).
    Mock,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Mock => "mock",
        }
    }
}

/// Per-keyword outcome of one analysis run. Transient: replaced wholesale on
/// the next run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityResult {
    /// The tracked keyword this result belongs to.
    pub keyword: String,
    /// The natural-language query generated for the keyword.
    pub query: String,
    /// Intent category the keyword classified into.
    pub intent: QueryIntent,
    /// Whether the brand name appears in the response.
    pub brand_mentioned: bool,
    /// Whether the mention is prominent (early or in a superlative phrase).
    pub prominent: bool,
    /// Visibility score, 0 through 10.
    pub score: u8,
    /// Coarse bucket derived from the score.
    pub tier: VisibilityTier,
    /// Sentiment of the response toward the brand.
    pub sentiment: Sentiment,
    /// Whether the response explicitly recommends the brand.
    pub recommendation: RecommendationLevel,
    /// Competitor names found in the response, with counts and rank info.
    pub competitor_mentions: Vec<CompetitorMention>,
    /// Brand position in traditional organic results, when SerpApi is
    /// configured and returned a match.
    pub organic_rank: Option<u32>,
    /// Whether the response was live or mock data.
    pub data_source: DataSource,
    /// Leading portion of the analyzed response, kept for display.
    pub response_excerpt: String,
    /// Timestamp of the analysis.
    pub analyzed_at: DateTime<Utc>,
}

impl VisibilityResult {
    /// Truncates response text to a display excerpt on a char boundary.
    pub fn excerpt_of(text: &str) -> String {
        const MAX_EXCERPT: usize = 280;
        if text.chars().count() <= MAX_EXCERPT {
            text.to_string()
        } else {
            let cut: String = text.chars().take(MAX_EXCERPT).collect();
            format!("{}…", cut.trim_end())
        }
    }
}
