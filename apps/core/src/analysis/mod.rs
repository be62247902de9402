//! # Analysis Module
//!
//! Fast, non-LLM heuristics for Optimly. Turns tracked keywords into
//! natural-language queries and analyzed responses into visibility results.
//!
//! ## Components
//! - `intent`: keyword intent classification using regex decision lists
//! - `templates`: query generation from intent/context template tables
//! - `sentiment`: sentiment and recommendation classification
//! - `visibility`: brand mention, prominence, and 0-10 scoring
//! - `metrics`: run-level aggregation (tiers, overall score, risk)
//! - `analyzer`: per-response orchestrator

pub mod analyzer;
pub mod intent;
pub mod metrics;
pub mod sentiment;
pub mod templates;
pub mod visibility;

pub use analyzer::ResponseAnalyzer;
pub use intent::{IntentClassifier, QueryIntent};
pub use metrics::{MetricsAggregator, RiskLevel, VisibilitySummary};
pub use sentiment::{RecommendationLevel, Sentiment, SentimentClassifier};
pub use templates::{QueryTemplateEngine, QueryVariables};
pub use visibility::{CompetitorMention, VisibilityScorer, VisibilityTier};
