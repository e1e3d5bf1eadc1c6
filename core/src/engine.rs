//! Destination engines and their search URLs

use crate::error::ConfigError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters left unescaped in a query component, matching `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A destination search or chat service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    /// Google web search
    #[serde(rename = "google")]
    Google,
    /// ChatGPT with web search hints
    #[serde(rename = "chatgpt")]
    ChatGpt,
    /// Perplexity answer engine
    #[serde(rename = "perplexity")]
    Perplexity,
    /// Bing web search
    #[serde(rename = "bing")]
    Bing,
}

impl Engine {
    /// Every supported engine, in default trigger priority order
    pub const ALL: [Engine; 4] = [
        Engine::ChatGpt,
        Engine::Perplexity,
        Engine::Bing,
        Engine::Google,
    ];

    /// Get the engine tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::ChatGpt => "chatgpt",
            Engine::Perplexity => "perplexity",
            Engine::Bing => "bing",
        }
    }

    /// Human readable service name
    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Google => "Google",
            Engine::ChatGpt => "ChatGPT",
            Engine::Perplexity => "Perplexity",
            Engine::Bing => "Bing",
        }
    }

    /// Build the destination URL for a cleaned query
    pub fn search_url(&self, query: &str) -> String {
        let q = encode_query(query);
        match self {
            Engine::Google => format!("https://www.google.com/search?q={}", q),
            Engine::ChatGpt => format!("https://chatgpt.com/?q={}&hints=search&ref=ext", q),
            Engine::Perplexity => format!("https://www.perplexity.ai/search?q={}", q),
            Engine::Bing => format!("https://www.bing.com/search?q={}", q),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Engine::Google),
            "chatgpt" | "gpt" => Ok(Engine::ChatGpt),
            "perplexity" | "pplx" => Ok(Engine::Perplexity),
            "bing" => Ok(Engine::Bing),
            _ => Err(ConfigError::UnknownEngine {
                name: s.to_string(),
            }),
        }
    }
}

/// Percent-encode a query the way browsers encode a URI component
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_aliases() {
        assert_eq!("ChatGPT".parse::<Engine>().unwrap(), Engine::ChatGpt);
        assert_eq!("gpt".parse::<Engine>().unwrap(), Engine::ChatGpt);
        assert_eq!(" pplx ".parse::<Engine>().unwrap(), Engine::Perplexity);
        assert_eq!("BING".parse::<Engine>().unwrap(), Engine::Bing);
        assert!(matches!(
            "yahoo".parse::<Engine>(),
            Err(ConfigError::UnknownEngine { .. })
        ));
    }

    #[test]
    fn test_encode_query_matches_uri_component() {
        assert_eq!(encode_query("what is rust"), "what%20is%20rust");
        assert_eq!(encode_query("a+b&c=d"), "a%2Bb%26c%3Dd");
        assert_eq!(encode_query("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_query("你好"), "%E4%BD%A0%E5%A5%BD");
    }

    #[test]
    fn test_search_urls() {
        assert_eq!(
            Engine::ChatGpt.search_url("what is rust"),
            "https://chatgpt.com/?q=what%20is%20rust&hints=search&ref=ext"
        );
        assert_eq!(
            Engine::Google.search_url("rust"),
            "https://www.google.com/search?q=rust"
        );
        assert_eq!(
            Engine::Perplexity.search_url("rust"),
            "https://www.perplexity.ai/search?q=rust"
        );
        assert_eq!(
            Engine::Bing.search_url("rust"),
            "https://www.bing.com/search?q=rust"
        );
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Engine::ChatGpt).unwrap();
        assert_eq!(json, "\"chatgpt\"");
        let engine: Engine = serde_json::from_str("\"perplexity\"").unwrap();
        assert_eq!(engine, Engine::Perplexity);
    }
}
