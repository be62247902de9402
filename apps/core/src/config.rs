//! Runtime configuration.
//!
//! API credentials are an explicit value passed into the pipeline, not
//! ambient global state. Every key is optional: a missing key routes the
//! corresponding provider to generated mock data instead of a live call.

use std::env;

use crate::error::AppError;

const DEFAULT_PROXY_URL: &str = "https://api.optimly.io/v1/proxy";

/// API keys for the supported providers, loaded from the environment.
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub serpapi_api_key: Option<String>,
}

impl ApiCredentials {
    /// Reads credentials from the environment. Blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: read_key("OPENAI_API_KEY"),
            anthropic_api_key: read_key("ANTHROPIC_API_KEY"),
            gemini_api_key: read_key("GEMINI_API_KEY"),
            serpapi_api_key: read_key("SERPAPI_API_KEY"),
        }
    }

    /// Whether any live completion provider is configured.
    pub fn has_completion_key(&self) -> bool {
        self.openai_api_key.is_some()
            || self.anthropic_api_key.is_some()
            || self.gemini_api_key.is_some()
    }
}

fn read_key(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Settings for the completion proxy endpoint.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the OpenAI-compatible proxy.
    pub base_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl ProxyConfig {
    /// Reads the proxy endpoint from `OPTIMLY_PROXY_URL` / `OPTIMLY_MODEL`,
    /// falling back to the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(base_url) = read_key("OPTIMLY_PROXY_URL") {
            url::Url::parse(&base_url)?;
            config.base_url = base_url;
        }
        if let Some(model) = read_key("OPTIMLY_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_counts_as_unset() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("  ")),
                ("ANTHROPIC_API_KEY", None::<&str>),
                ("GEMINI_API_KEY", None),
                ("SERPAPI_API_KEY", Some("sk-serp")),
            ],
            || {
                let creds = ApiCredentials::from_env();
                assert!(creds.openai_api_key.is_none());
                assert!(!creds.has_completion_key());
                assert_eq!(creds.serpapi_api_key.as_deref(), Some("sk-serp"));
            },
        );
    }

    #[test]
    fn test_completion_key_detected() {
        temp_env::with_vars([("OPENAI_API_KEY", Some("sk-test"))], || {
            let creds = ApiCredentials::from_env();
            assert!(creds.has_completion_key());
        });
    }

    #[test]
    fn test_proxy_config_rejects_bad_url() {
        temp_env::with_vars([("OPTIMLY_PROXY_URL", Some("not a url"))], || {
            assert!(ProxyConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_proxy_config_defaults() {
        temp_env::with_vars(
            [("OPTIMLY_PROXY_URL", None::<&str>), ("OPTIMLY_MODEL", None)],
            || {
                let config = ProxyConfig::from_env().unwrap();
                assert_eq!(config.base_url, DEFAULT_PROXY_URL);
                assert_eq!(config.model, "gpt-4o-mini");
            },
        );
    }
}
