//! Analysis pipeline.
//!
//! Walks the brand's keywords sequentially: classify intent, generate a
//! query, fetch (or mock) a response, analyze it, then aggregate the run.
//! A failed live call logs a warning and falls back to mock data for that
//! keyword; nothing is retried or queued.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::ResponseAnalyzer;
use crate::analysis::intent::IntentClassifier;
use crate::analysis::metrics::{MetricsAggregator, VisibilitySummary};
use crate::analysis::templates::{QueryTemplateEngine, QueryVariables};
use crate::clients::mock::MockProvider;
use crate::clients::openai::ProxyClient;
use crate::clients::serp::SerpClient;
use crate::clients::traits::CompletionProvider;
use crate::config::{ApiCredentials, ProxyConfig};
use crate::error::AppError;
use crate::models::{BrandProfile, DataSource, SearchContext, VisibilityResult};

/// Full output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub run_id: Uuid,
    pub brand: String,
    pub context: SearchContext,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<VisibilityResult>,
    pub summary: VisibilitySummary,
}

/// Sequential per-keyword analysis pipeline.
pub struct AnalysisRunner {
    live_provider: Option<Box<dyn CompletionProvider>>,
    serp_client: Option<SerpClient>,
    fallback: MockProvider,
    intent_classifier: IntentClassifier,
    template_engine: QueryTemplateEngine,
    analyzer: ResponseAnalyzer,
    aggregator: MetricsAggregator,
    rng: StdRng,
}

impl AnalysisRunner {
    /// Build a runner from credentials. A configured OpenAI key selects the
    /// live proxy; otherwise every keyword uses mock data from the start.
    pub fn new(
        profile: &BrandProfile,
        credentials: &ApiCredentials,
        proxy: ProxyConfig,
        seed: Option<u64>,
    ) -> Self {
        let live_provider: Option<Box<dyn CompletionProvider>> =
            match &credentials.openai_api_key {
                Some(key) => Some(Box::new(ProxyClient::new(proxy, Some(key.clone())))),
                None => {
                    info!("No completion API key configured, using mock data");
                    None
                }
            };

        let mut runner = Self::with_provider(profile, live_provider, seed);
        if let Some(key) = &credentials.serpapi_api_key {
            runner.serp_client = Some(SerpClient::new(key.clone()));
        }
        runner
    }

    /// Attach a SerpApi client so results carry traditional organic ranks.
    pub fn with_serp_client(mut self, serp_client: SerpClient) -> Self {
        self.serp_client = Some(serp_client);
        self
    }

    /// Build a runner around an explicit provider (or none for mock-only).
    pub fn with_provider(
        profile: &BrandProfile,
        live_provider: Option<Box<dyn CompletionProvider>>,
        seed: Option<u64>,
    ) -> Self {
        // Derive the mock generator's seed from the run seed so one seed
        // reproduces the whole run.
        let fallback = MockProvider::new(
            profile.name.clone(),
            profile.competitors.clone(),
            seed.map(|s| s.wrapping_add(1)),
        );
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            live_provider,
            serp_client: None,
            fallback,
            intent_classifier: IntentClassifier::new(),
            template_engine: QueryTemplateEngine::new(),
            analyzer: ResponseAnalyzer::new(),
            aggregator: MetricsAggregator::new(),
            rng,
        }
    }

    /// Run the full analysis for a profile. Keywords are processed one at a
    /// time; each gets a single provider attempt before the mock fallback.
    pub async fn run(
        &mut self,
        profile: &BrandProfile,
        context: SearchContext,
    ) -> Result<VisibilityReport, AppError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, brand = %profile.name, context = context.label(), "Starting visibility analysis");

        let vars = QueryVariables {
            brand: profile.name.clone(),
            category: Some(profile.industry.clone()),
            competitors: profile.competitors.clone(),
            location: profile.location.clone(),
        };

        let mut results = Vec::with_capacity(profile.keywords.len());

        for keyword in &profile.keywords {
            let intent = self.intent_classifier.classify(keyword);
            let query =
                self.template_engine
                    .generate(keyword, intent, context, &vars, &mut self.rng);

            let (response, data_source) = self.fetch_response(&query).await?;

            let mut result = self.analyzer.analyze(
                keyword,
                &query,
                intent,
                &response,
                &profile.name,
                &profile.competitors,
                data_source,
            );
            result.organic_rank = self.lookup_organic_rank(keyword, &profile.name).await;
            info!(
                keyword = %keyword,
                intent = intent.label(),
                score = result.score,
                tier = result.tier.label(),
                source = data_source.label(),
                "Keyword analyzed"
            );
            results.push(result);
        }

        let summary = self.aggregator.summarize(&results);
        info!(
            %run_id,
            overall_score = summary.overall_score,
            mentioned = summary.high_visibility + summary.low_visibility,
            risk = summary.risk_level.label(),
            "Analysis complete"
        );

        Ok(VisibilityReport {
            run_id,
            brand: profile.name.clone(),
            context,
            generated_at: Utc::now(),
            results,
            summary,
        })
    }

    /// One provider attempt, then the mock fallback.
    async fn fetch_response(&self, query: &str) -> Result<(String, DataSource), AppError> {
        if let Some(provider) = &self.live_provider {
            match provider.complete(query).await {
                Ok(response) => return Ok((response, DataSource::Live)),
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Live call failed, falling back to mock data");
                }
            }
        }

        let response = self.fallback.complete(query).await?;
        Ok((response, DataSource::Mock))
    }

    /// Traditional-search comparison: one SerpApi attempt per keyword,
    /// degrading to no rank on any failure.
    async fn lookup_organic_rank(&self, keyword: &str, brand: &str) -> Option<u32> {
        let client = self.serp_client.as_ref()?;
        match client.search(keyword).await {
            Ok(results) => results.brand_rank(brand),
            Err(err) => {
                warn!(error = %err, keyword = %keyword, "SERP lookup failed, skipping organic rank");
                None
            }
        }
    }
}
