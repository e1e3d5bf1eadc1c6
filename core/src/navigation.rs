//! Search navigation routing
//!
//! Turns an outgoing search URL into a redirect decision: decides whether the
//! navigation is ours to touch, classifies its query, and builds the URL that
//! should replace it.

use crate::classifier::{classify, Classification};
use crate::config::ClassifierConfig;
use crate::engine::Engine;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

/// Query parameter marking a navigation we already rewrote
pub const REDIRECT_MARKER: &str = "redirected_by_smart_search";

const SEARCH_HOST: &str = "www.google.com";
const SEARCH_PATH: &str = "/search";

/// Why a navigation was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a parseable absolute URL
    InvalidUrl,
    /// Not a Google search results page
    NotSearchPage,
    /// Carries the redirect marker
    AlreadyRedirected,
    /// Issued by Google itself (homepage box, spell correction, tracked clicks)
    GoogleInternal,
    /// No query to classify
    EmptyQuery,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::InvalidUrl => "invalid url",
            SkipReason::NotSearchPage => "not a search page",
            SkipReason::AlreadyRedirected => "already redirected",
            SkipReason::GoogleInternal => "google internal navigation",
            SkipReason::EmptyQuery => "empty query",
        };
        f.write_str(text)
    }
}

/// What to do with an intercepted navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Let the navigation continue unchanged
    Skip { reason: SkipReason },
    /// Replace the navigation with `url`
    Redirect {
        url: String,
        classification: Classification,
    },
}

impl RouteDecision {
    /// Redirect target, if any
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            RouteDecision::Redirect { url, .. } => Some(url),
            RouteDecision::Skip { .. } => None,
        }
    }
}

/// Routes search navigations with a fixed configuration snapshot
#[derive(Debug, Clone)]
pub struct NavigationRouter {
    config: ClassifierConfig,
}

impl NavigationRouter {
    /// Create a router for a configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Decide what to do with a navigation to `raw_url`
    pub fn route(&self, raw_url: &str) -> RouteDecision {
        let decision = self.decide(raw_url);
        match &decision {
            RouteDecision::Skip { reason } => {
                debug!(url = raw_url, %reason, "Navigation skipped");
            }
            RouteDecision::Redirect {
                url,
                classification,
            } => {
                debug!(
                    from = raw_url,
                    to = %url,
                    engine = %classification.engine,
                    trigger = ?classification.matched_trigger,
                    word_count = ?classification.word_count,
                    "Navigation redirected"
                );
            }
        }
        decision
    }

    fn decide(&self, raw_url: &str) -> RouteDecision {
        let skip = |reason| RouteDecision::Skip { reason };

        let Ok(url) = Url::parse(raw_url.trim()) else {
            return skip(SkipReason::InvalidUrl);
        };

        if url.host_str() != Some(SEARCH_HOST) || !url.path().starts_with(SEARCH_PATH) {
            return skip(SkipReason::NotSearchPage);
        }

        let mut query = None;
        let mut redirected = false;
        let mut internal = false;
        for (key, value) in url.query_pairs() {
            match &*key {
                REDIRECT_MARKER => redirected = true,
                "sxsrf" | "ved" => internal = true,
                "source" if value == "hp" => internal = true,
                "spell" if value == "1" => internal = true,
                "q" if query.is_none() => query = Some(value.into_owned()),
                _ => {}
            }
        }

        if redirected {
            return skip(SkipReason::AlreadyRedirected);
        }
        if internal {
            return skip(SkipReason::GoogleInternal);
        }

        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return skip(SkipReason::EmptyQuery),
        };

        let classification = classify(&query, &self.config);
        let target = match classification.engine {
            Engine::Google => mark_redirected(&url, &classification.cleaned_query),
            engine => engine.search_url(&classification.cleaned_query),
        };

        RouteDecision::Redirect {
            url: target,
            classification,
        }
    }
}

/// Rewrite a Google search URL with the cleaned query and the redirect marker
fn mark_redirected(url: &Url, cleaned_query: &str) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != "q")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut rewritten = url.clone();
    {
        let mut query = rewritten.query_pairs_mut();
        query.clear();
        query.append_pair("q", cleaned_query);
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        query.append_pair(REDIRECT_MARKER, "true");
    }
    rewritten.to_string()
}
