//! SerpApi client for traditional search comparison.
//!
//! Fetches Google-style organic, local, and knowledge-graph results for a
//! query so AI visibility can be compared against classic rankings.
//! Rate-limit and invalid-key responses map to distinct error variants.

use reqwest::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::error::AppError;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_SERP_URL: &str = "https://serpapi.com";

/// One organic (blue-link) result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// One entry in the local pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPlace {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// Local-pack container as SerpApi returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalResults {
    #[serde(default)]
    pub places: Vec<LocalPlace>,
}

/// Knowledge-graph panel, when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Deserialized `search.json` payload, limited to the fields we read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    #[serde(default)]
    pub local_results: Option<LocalResults>,
    #[serde(default)]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResults {
    /// Position of the first organic result matching the brand by title or
    /// link, 1-based as SerpApi reports it.
    pub fn brand_rank(&self, brand: &str) -> Option<u32> {
        let needle = brand.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.organic_results
            .iter()
            .find(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.link.to_lowercase().contains(&needle)
            })
            .map(|r| r.position)
    }
}

/// HTTP client for SerpApi's `search.json` endpoint.
pub struct SerpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerpClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_SERP_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    /// Run a Google search for the query.
    pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        debug!("Requesting SERP results");

        let url = Url::parse_with_params(
            &format!("{}/search.json", self.base_url),
            &[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ],
        )?;

        let res = timeout(SEARCH_TIMEOUT, self.client.get(url).send()).await??;

        match res.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(AppError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppError::InvalidApiKey)
            }
            status if !status.is_success() => {
                let body = res.text().await.unwrap_or_default();
                return Err(AppError::Provider(format!(
                    "Search request failed with status {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let results: SearchResults = res.json().await?;

        if let Some(error) = &results.error {
            if error.to_lowercase().contains("invalid api key") {
                return Err(AppError::InvalidApiKey);
            }
            return Err(AppError::Provider(format!("SerpApi error: {}", error)));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server_url: &str) -> SerpClient {
        SerpClient::with_base_url(server_url.to_string(), "serp-key".to_string())
    }

    #[tokio::test]
    async fn test_search_success() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("engine", "google"))
            .and(query_param("q", "best crm software"))
            .and(query_param("api_key", "serp-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic_results": [
                    {"position": 1, "title": "Globex CRM", "link": "https://globex.com", "snippet": "..."},
                    {"position": 2, "title": "Acme - CRM for teams", "link": "https://acme.io", "snippet": "..."}
                ],
                "local_results": {"places": [{"title": "Acme HQ", "address": "Austin, TX", "rating": 4.5}]},
                "knowledge_graph": {"title": "Acme", "website": "https://acme.io"}
            })))
            .mount(&mock_server)
            .await;

        let results = client.search("best crm software").await.unwrap();

        assert_eq!(results.organic_results.len(), 2);
        assert_eq!(results.brand_rank("Acme"), Some(2));
        assert_eq!(results.brand_rank("Missing"), None);
        assert_eq!(
            results.local_results.unwrap().places[0].rating,
            Some(4.5)
        );
        assert_eq!(results.knowledge_graph.unwrap().title, "Acme");
    }

    #[tokio::test]
    async fn test_search_rate_limited() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let result = client.search("query").await;
        assert!(matches!(result, Err(AppError::RateLimited)));
    }

    #[tokio::test]
    async fn test_search_invalid_key_status() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = client.search("query").await;
        assert!(matches!(result, Err(AppError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_search_invalid_key_in_body() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"error": "Invalid API key. Your account is suspended."})),
            )
            .mount(&mock_server)
            .await;

        let result = client.search("query").await;
        assert!(matches!(result, Err(AppError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_search_missing_sections_default() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let results = client.search("query").await.unwrap();
        assert!(results.organic_results.is_empty());
        assert!(results.local_results.is_none());
        assert!(results.knowledge_graph.is_none());
    }
}
