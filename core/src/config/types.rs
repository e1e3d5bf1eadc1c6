//! Classifier configuration types
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::engine::Engine;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of words at which an unmatched query counts as long
pub const DEFAULT_WORD_THRESHOLD: u32 = 6;

/// Ordered trigger prefixes for one engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSet {
    /// Engine selected when one of the triggers matches
    pub engine: Engine,
    /// Case-insensitive prefixes, usually ending in a space
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl TriggerSet {
    /// Create a trigger set from string slices
    pub fn new<I, S>(engine: Engine, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            engine,
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }
}

/// A fully resolved classifier configuration
///
/// The order of `engine_triggers` is the trigger priority order: the first
/// engine with a matching trigger wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Trigger lists in priority order
    pub engine_triggers: Vec<TriggerSet>,
    /// Minimum word count routed to the long-query engine
    pub word_threshold: u32,
    /// Engine for unmatched queries at or above the threshold
    pub default_long_query_engine: Engine,
    /// Engine for unmatched queries below the threshold
    pub default_short_query_engine: Engine,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            engine_triggers: vec![
                TriggerSet::new(
                    Engine::ChatGpt,
                    ["chat ", "chatgpt ", "gpt ", "讲讲", "解释"],
                ),
                TriggerSet::new(Engine::Perplexity, ["pplx ", "perplexity "]),
                TriggerSet::new(Engine::Bing, ["bing "]),
                TriggerSet::new(Engine::Google, ["google ", "g ", "搜索"]),
            ],
            word_threshold: DEFAULT_WORD_THRESHOLD,
            default_long_query_engine: Engine::ChatGpt,
            default_short_query_engine: Engine::Google,
        }
    }
}

impl ClassifierConfig {
    /// Get the triggers configured for an engine
    pub fn triggers_for(&self, engine: Engine) -> &[String] {
        self.engine_triggers
            .iter()
            .find(|set| set.engine == engine)
            .map(|set| set.triggers.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the triggers of an engine, appending it at the lowest
    /// priority if it had no trigger set yet
    pub fn set_triggers(&mut self, engine: Engine, triggers: Vec<String>) {
        match self.engine_triggers.iter_mut().find(|set| set.engine == engine) {
            Some(set) => set.triggers = triggers,
            None => self.engine_triggers.push(TriggerSet { engine, triggers }),
        }
    }

    /// Set the word threshold
    pub fn with_word_threshold(mut self, threshold: u32) -> Self {
        self.word_threshold = threshold;
        self
    }

    /// Set the long-query fallback engine
    pub fn with_long_query_engine(mut self, engine: Engine) -> Self {
        self.default_long_query_engine = engine;
        self
    }

    /// Set the short-query fallback engine
    pub fn with_short_query_engine(mut self, engine: Engine) -> Self {
        self.default_short_query_engine = engine;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_threshold < 1 {
            return Err(ConfigError::InvalidValue {
                field: "word_threshold".to_string(),
                value: self.word_threshold.to_string(),
            });
        }

        for set in &self.engine_triggers {
            if set.triggers.iter().any(|t| t.is_empty()) {
                return Err(ConfigError::EmptyTrigger {
                    engine: set.engine.to_string(),
                });
            }
        }

        Ok(())
    }
}
