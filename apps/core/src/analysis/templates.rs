//! Query template engine.
//!
//! Turns a tracked keyword plus brand context into a natural-language query
//! for the simulated search surface. Each intent category has a fixed array
//! of templates with `{placeholder}` tokens; voice and traditional search
//! contexts have their own arrays. Template choice is pseudo-random through
//! an injected RNG so a fixed seed reproduces the exact query sequence.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::SearchContext;

use super::intent::QueryIntent;

/// Variables substituted into the chosen template. Missing values degrade
/// to default phrasing rather than erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryVariables {
    /// Brand name, substituted for `{brand}`.
    pub brand: String,
    /// Product/industry category for `{category}`.
    pub category: Option<String>,
    /// Competitor names; one is picked for `{competitor}`.
    pub competitors: Vec<String>,
    /// Location for `{location}`.
    pub location: Option<String>,
}

const COMPARISON_TEMPLATES: &[&str] = &[
    "How does {brand} compare to {competitor} for {keyword}?",
    "Which is better for {keyword}: {brand} or {competitor}?",
    "What are the main differences between {brand} and {competitor}?",
];

const REVIEW_TEMPLATES: &[&str] = &[
    "What do people think of {brand} for {keyword}?",
    "Is {brand} any good when it comes to {keyword}?",
    "What are honest reviews of {brand} saying?",
];

const TRANSACTIONAL_TEMPLATES: &[&str] = &[
    "Where is the best place to buy {keyword}?",
    "How do I get started with {keyword}?",
    "What should I look for before purchasing {keyword}?",
];

const PRICING_TEMPLATES: &[&str] = &[
    "How much does {keyword} usually cost?",
    "What is the pricing like for {brand}?",
    "Is {brand} worth the price compared to {competitor}?",
];

const LOCAL_TEMPLATES: &[&str] = &[
    "What are the best options for {keyword} in {location}?",
    "Where can I find {keyword} in {location}?",
    "Recommend good {category} providers in {location}.",
];

const ALTERNATIVE_TEMPLATES: &[&str] = &[
    "What are good alternatives to {brand} for {keyword}?",
    "What should I use instead of {competitor} for {keyword}?",
    "Are there options similar to {brand} worth considering?",
];

const RECOMMENDATION_TEMPLATES: &[&str] = &[
    "What is the best {category} for {keyword}?",
    "Which {category} would you recommend for {keyword}?",
    "What are the top options for {keyword} right now?",
];

const INFORMATIONAL_TEMPLATES: &[&str] = &[
    "Tell me about {keyword}.",
    "What should I know about {keyword}?",
    "How does {keyword} work?",
];

const VOICE_TEMPLATES: &[&str] = &[
    "Hey, what's the best option for {keyword} in {location}?",
    "Can you recommend something for {keyword}?",
    "What do you know about {brand} for {keyword}?",
];

const TRADITIONAL_TEMPLATES: &[&str] = &[
    "{keyword}",
    "{keyword} {brand}",
    "best {keyword} {location}",
];

/// Query generator over the fixed template tables.
pub struct QueryTemplateEngine;

impl Default for QueryTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTemplateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate a query for a keyword. The search context overrides the
    /// per-intent table for voice and traditional surfaces; AI chat uses
    /// the intent-specific phrasing.
    pub fn generate(
        &self,
        keyword: &str,
        intent: QueryIntent,
        context: SearchContext,
        vars: &QueryVariables,
        rng: &mut StdRng,
    ) -> String {
        let templates = match context {
            SearchContext::Voice => VOICE_TEMPLATES,
            SearchContext::Traditional => TRADITIONAL_TEMPLATES,
            SearchContext::AiChat => match intent {
                QueryIntent::Comparison => COMPARISON_TEMPLATES,
                QueryIntent::Review => REVIEW_TEMPLATES,
                QueryIntent::Transactional => TRANSACTIONAL_TEMPLATES,
                QueryIntent::Pricing => PRICING_TEMPLATES,
                QueryIntent::Local => LOCAL_TEMPLATES,
                QueryIntent::Alternative => ALTERNATIVE_TEMPLATES,
                QueryIntent::Recommendation => RECOMMENDATION_TEMPLATES,
                QueryIntent::Informational => INFORMATIONAL_TEMPLATES,
            },
        };

        let template = templates[rng.gen_range(0..templates.len())];
        self.substitute(template, keyword, vars, rng)
    }

    /// Replace `{placeholder}` tokens with the supplied variables,
    /// falling back to default phrasing for anything missing.
    fn substitute(
        &self,
        template: &str,
        keyword: &str,
        vars: &QueryVariables,
        rng: &mut StdRng,
    ) -> String {
        let competitor = if vars.competitors.is_empty() {
            "other options".to_string()
        } else {
            vars.competitors[rng.gen_range(0..vars.competitors.len())].clone()
        };

        let category = vars
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "option".to_string());

        let mut query = template
            .replace("{keyword}", keyword)
            .replace("{brand}", &vars.brand)
            .replace("{competitor}", &competitor)
            .replace("{category}", &category);

        query = match &vars.location {
            Some(location) if !location.trim().is_empty() => {
                query.replace("{location}", location)
            }
            // degrade "in {location}" to "near me" phrasing
            _ => query.replace("in {location}", "near me").replace("{location}", "near me"),
        };

        query.trim().to_string()
    }
}
