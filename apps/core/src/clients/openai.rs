//! OpenAI-compatible proxy client.
//!
//! Sends `{"prompt": ..., "model": ...}` to the configured proxy endpoint
//! and expects `{"content": ...}` back, or `{"error": ...}` on failure.
//! One attempt per call; the pipeline falls back to mock data on error.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ProxyConfig;
use crate::error::AppError;

use super::traits::CompletionProvider;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the completion proxy.
pub struct ProxyClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ProxyClient {
    pub fn new(config: ProxyConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
            model: config.model,
            api_key,
        }
    }

    fn build_request(&self, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let auth_value = format!("Bearer {}", key);
            let parsed = auth_value
                .parse()
                .map_err(|_| AppError::Config("API key is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, parsed);
        }

        Ok(self.client.post(&self.base_url).headers(headers).json(payload))
    }

    async fn generate_completion(&self, prompt: &str) -> Result<String, AppError> {
        debug!(model = %self.model, "Requesting completion for query");

        let payload = serde_json::json!({
            "prompt": prompt,
            "model": self.model,
        });

        let request_future = self.build_request(&payload)?.send();
        let res = timeout(COMPLETION_TIMEOUT, request_future).await??;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;

        if let Some(error) = json["error"].as_str() {
            return Err(AppError::Provider(format!("Proxy returned error: {}", error)));
        }

        match json["content"].as_str() {
            Some(content) if !content.is_empty() => Ok(content.to_string()),
            _ => Err(AppError::Provider(
                "Proxy response missing content field".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionProvider for ProxyClient {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        self.generate_completion(prompt).await
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server_url: &str) -> ProxyClient {
        ProxyClient::new(
            ProxyConfig {
                base_url: format!("{}/completion", server_url),
                model: "gpt-4o-mini".to_string(),
            },
            Some("sk-test".to_string()),
        )
    }

    #[tokio::test]
    async fn test_completion_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/completion"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"content": "Acme is a strong option."})),
            )
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = client.complete("What is the best crm?").await;

        // 3. Assert
        assert_eq!(result.unwrap(), "Acme is a strong option.");
    }

    #[tokio::test]
    async fn test_completion_error_field() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/completion"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "model overloaded"})),
            )
            .mount(&mock_server)
            .await;

        let result = client.complete("query").await;

        match result {
            Err(AppError::Provider(msg)) => assert!(msg.contains("model overloaded")),
            other => panic!("Expected AppError::Provider, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_completion_server_error() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/completion"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = client.complete("query").await;

        match result {
            Err(AppError::Provider(msg)) => {
                assert!(msg.contains("status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected AppError::Provider, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_completion_missing_content() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/completion"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
            .mount(&mock_server)
            .await;

        let result = client.complete("query").await;
        assert!(matches!(result, Err(AppError::Provider(_))));
    }
}
