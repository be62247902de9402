//! Full workflow tests: proxy-backed analysis runs end to end, including
//! the mock fallback path and CSV export.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::analysis::metrics::RiskLevel;
use crate::clients::openai::ProxyClient;
use crate::clients::serp::SerpClient;
use crate::clients::traits::CompletionProvider;
use crate::config::ProxyConfig;
use crate::export;
use crate::models::{BrandProfile, DataSource, SearchContext};
use crate::runner::AnalysisRunner;

fn profile() -> BrandProfile {
    BrandProfile {
        name: "Acme".to_string(),
        industry: "crm software".to_string(),
        keywords: vec![
            "Acme vs Globex".to_string(),
            "best crm software".to_string(),
        ],
        competitors: vec!["Globex".to_string()],
        location: Some("Austin".to_string()),
        contact_email: None,
    }
}

fn proxy_for(server_uri: &str) -> Box<dyn CompletionProvider> {
    Box::new(ProxyClient::new(
        ProxyConfig {
            base_url: format!("{}/completion", server_uri),
            model: "gpt-4o-mini".to_string(),
        },
        Some("sk-test".to_string()),
    ))
}

#[tokio::test]
async fn test_full_run_against_live_proxy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "We recommend Acme as the best option for most teams. \
                        Globex is also worth a look but falls short on pricing."
        })))
        .mount(&mock_server)
        .await;

    let profile = profile();
    let mut runner =
        AnalysisRunner::with_provider(&profile, Some(proxy_for(&mock_server.uri())), Some(3));

    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert_eq!(result.data_source, DataSource::Live);
        assert!(result.brand_mentioned);
        assert!(result.score >= 7);
    }
    assert_eq!(report.summary.total_keywords, 2);
    assert_eq!(report.summary.high_visibility, 2);
    assert_eq!(report.summary.risk_level, RiskLevel::Low);
    assert_eq!(report.summary.competitor_totals[0].name, "Globex");
}

#[tokio::test]
async fn test_proxy_failure_degrades_to_mock_per_keyword() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/completion"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let profile = profile();
    let mut runner =
        AnalysisRunner::with_provider(&profile, Some(proxy_for(&mock_server.uri())), Some(3));

    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    // every keyword still produces a result, all from mock data
    assert_eq!(report.results.len(), 2);
    assert!(report
        .results
        .iter()
        .all(|r| r.data_source == DataSource::Mock));
}

#[tokio::test]
async fn test_report_exports_to_csv() {
    let profile = profile();
    let mut runner = AnalysisRunner::with_provider(&profile, None, Some(11));
    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("report.csv");
    export::export_to_path(&csv_path, &report.results).unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), report.results.len() + 1);
    assert!(lines[0].starts_with("keyword,query,intent"));
    assert!(lines[1].contains("comparison"));
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let profile = profile();
    let mut runner = AnalysisRunner::with_provider(&profile, None, Some(11));
    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    let raw = serde_json::to_string(&report).unwrap();
    let parsed: crate::runner::VisibilityReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.brand, "Acme");
    assert_eq!(parsed.results.len(), report.results.len());
}

#[tokio::test]
async fn test_serp_rank_attached_when_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [
                {"position": 1, "title": "Globex CRM", "link": "https://globex.com"},
                {"position": 3, "title": "Acme CRM", "link": "https://acme.io"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let profile = profile();
    let serp = SerpClient::with_base_url(mock_server.uri(), "serp-key".to_string());
    let mut runner =
        AnalysisRunner::with_provider(&profile, None, Some(2)).with_serp_client(serp);

    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    assert!(report.results.iter().all(|r| r.organic_rank == Some(3)));
}

#[tokio::test]
async fn test_serp_failure_leaves_rank_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let profile = profile();
    let serp = SerpClient::with_base_url(mock_server.uri(), "serp-key".to_string());
    let mut runner =
        AnalysisRunner::with_provider(&profile, None, Some(2)).with_serp_client(serp);

    let report = runner.run(&profile, SearchContext::AiChat).await.unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|r| r.organic_rank.is_none()));
}

#[tokio::test]
async fn test_voice_context_changes_phrasing() {
    let profile = profile();
    let mut runner = AnalysisRunner::with_provider(&profile, None, Some(4));
    let report = runner.run(&profile, SearchContext::Voice).await.unwrap();

    // voice templates substitute fully, whatever the keyword's intent
    for result in &report.results {
        assert!(!result.query.is_empty());
        assert!(!result.query.contains('{'));
    }
}
