//! Search suggestion proxy
//!
//! Forwards a partial query to Google's suggestion endpoint. Failures never
//! surface to the caller: they yield an empty suggestion list.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default suggestion service
pub const DEFAULT_SUGGEST_URL: &str = "https://suggestqueries.google.com";

/// Suggestions for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub query: String,
    pub suggestions: Vec<String>,
}

impl Suggestions {
    /// No suggestions for a query
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            suggestions: Vec::new(),
        }
    }

    /// The OpenSearch style `[query, [suggestions...]]` array
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.query, self.suggestions])
    }
}

/// Client for the suggestion endpoint
#[derive(Debug, Clone)]
pub struct SuggestClient {
    http: reqwest::Client,
    base_url: String,
}

impl SuggestClient {
    /// Create a client for the default service
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_SUGGEST_URL)
    }

    /// Create a client for a custom service
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch suggestions, degrading to an empty list on any failure
    pub async fn suggest(&self, query: &str) -> Suggestions {
        if query.is_empty() {
            return Suggestions::empty("");
        }

        match self.fetch(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(query, error = %e, "Suggestion request failed");
                Suggestions::empty(query)
            }
        }
    }

    /// Fetch suggestions, reporting failures
    pub async fn fetch(&self, query: &str) -> Result<Suggestions> {
        let url = format!("{}/complete/search", self.base_url);
        debug!(%url, query, "Requesting suggestions");

        let body: serde_json::Value = self
            .http
            .get(&url)
            .query(&[("client", "chrome"), ("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_suggestions(query, &body)
    }
}

impl Default for SuggestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `[query, [suggestions...], ...]` response body
fn parse_suggestions(query: &str, body: &serde_json::Value) -> Result<Suggestions> {
    let items = body
        .as_array()
        .and_then(|arr| arr.get(1))
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::Generic("Unexpected suggestion response shape".to_string()))?;

    let echoed = body
        .get(0)
        .and_then(|v| v.as_str())
        .unwrap_or(query)
        .to_string();

    Ok(Suggestions {
        query: echoed,
        suggestions: items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_suggestions() {
        let body = serde_json::json!(["rust", ["rust lang", "rust game", 3], [], {}]);
        let parsed = parse_suggestions("rust", &body).unwrap();
        assert_eq!(parsed.query, "rust");
        assert_eq!(parsed.suggestions, vec!["rust lang", "rust game"]);

        assert!(parse_suggestions("rust", &serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_to_json_shape() {
        let s = Suggestions::empty("rust");
        assert_eq!(s.to_json(), serde_json::json!(["rust", []]));
    }

    #[tokio::test]
    async fn test_suggest_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/complete/search"))
            .and(query_param("client", "chrome"))
            .and(query_param("q", "tokio"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!(["tokio", ["tokio rs", "tokio select"]])),
            )
            .mount(&server)
            .await;

        let client = SuggestClient::with_base_url(server.uri());
        let result = client.suggest("tokio").await;
        assert_eq!(result.suggestions, vec!["tokio rs", "tokio select"]);
    }

    #[tokio::test]
    async fn test_suggest_degrades_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SuggestClient::with_base_url(server.uri());
        assert_eq!(client.suggest("tokio").await, Suggestions::empty("tokio"));
        assert!(client.fetch("tokio").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let client = SuggestClient::with_base_url("http://127.0.0.1:9");
        assert_eq!(client.suggest("").await, Suggestions::empty(""));
    }
}
