//! Query classification
//!
//! Decides which engine a search query goes to. Explicit trigger prefixes
//! win; otherwise the word count picks between the long- and short-query
//! engines. Classification is pure: no I/O, no logging, no shared state.

pub mod word_count;

pub use word_count::{is_dense_script, word_count};

use crate::config::ClassifierConfig;
use crate::engine::Engine;
use serde::{Deserialize, Serialize};

/// Outcome of classifying a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Destination engine
    pub engine: Engine,
    /// Query with surrounding whitespace and any trigger prefix removed
    pub cleaned_query: String,
    /// The trigger that selected the engine, as configured
    pub matched_trigger: Option<String>,
    /// Word count used by the fallback rule, absent when a trigger matched
    pub word_count: Option<usize>,
}

impl Classification {
    /// Destination URL for this classification
    pub fn destination_url(&self) -> String {
        self.engine.search_url(&self.cleaned_query)
    }
}

/// Classify a query against a configuration
pub fn classify(raw_query: &str, config: &ClassifierConfig) -> Classification {
    let trimmed = raw_query.trim();

    if let Some((engine, trigger, prefix_len)) = find_trigger(trimmed, config) {
        return Classification {
            engine,
            cleaned_query: trimmed[prefix_len..].trim().to_string(),
            matched_trigger: Some(trigger.to_string()),
            word_count: None,
        };
    }

    let count = word_count(trimmed);
    let engine = if count >= config.word_threshold as usize {
        config.default_long_query_engine
    } else {
        config.default_short_query_engine
    };

    Classification {
        engine,
        cleaned_query: trimmed.to_string(),
        matched_trigger: None,
        word_count: Some(count),
    }
}

/// Classify a query that may be missing; a missing query is treated as empty
pub fn classify_opt(raw_query: Option<&str>, config: &ClassifierConfig) -> Classification {
    classify(raw_query.unwrap_or_default(), config)
}

/// First engine (in priority order) with a matching trigger, together with
/// its longest matching trigger and the byte length of the matched prefix
fn find_trigger<'a>(text: &str, config: &'a ClassifierConfig) -> Option<(Engine, &'a str, usize)> {
    for set in &config.engine_triggers {
        let mut best: Option<(&str, usize)> = None;

        for trigger in &set.triggers {
            if let Some(len) = prefix_len_ignore_case(text, trigger) {
                // Strictly longer only, so ties keep the first configured trigger
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((trigger.as_str(), len));
                }
            }
        }

        if let Some((trigger, len)) = best {
            return Some((set.engine, trigger, len));
        }
    }

    None
}

/// Byte length of the prefix of `text` that equals `trigger` ignoring case
///
/// Walks `text` one character at a time so the cut always lands on a char
/// boundary, even when lower-casing changes byte lengths.
fn prefix_len_ignore_case(text: &str, trigger: &str) -> Option<usize> {
    if trigger.is_empty() {
        return None;
    }

    // Per-char folding on both sides; `str::to_lowercase` would turn a
    // word-final Σ into ς while the input side yields σ.
    let target: String = trigger.chars().flat_map(char::to_lowercase).collect();
    let mut folded = String::with_capacity(target.len());

    for (idx, ch) in text.char_indices() {
        folded.extend(ch.to_lowercase());

        if folded.len() >= target.len() {
            return (folded == target).then_some(idx + ch.len_utf8());
        }
        if !target.starts_with(folded.as_str()) {
            return None;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerSet;

    fn config_with(sets: Vec<TriggerSet>) -> ClassifierConfig {
        ClassifierConfig {
            engine_triggers: sets,
            word_threshold: 6,
            default_long_query_engine: Engine::ChatGpt,
            default_short_query_engine: Engine::Google,
        }
    }

    #[test]
    fn test_trigger_is_case_insensitive_and_stripped() {
        let config = config_with(vec![TriggerSet::new(Engine::ChatGpt, ["chat "])]);
        let result = classify("Chat  what is rust", &config);

        assert_eq!(result.engine, Engine::ChatGpt);
        assert_eq!(result.cleaned_query, "what is rust");
        assert_eq!(result.matched_trigger.as_deref(), Some("chat "));
        assert_eq!(result.word_count, None);
    }

    #[test]
    fn test_uppercase_trigger_matches_lowercase_input() {
        let config = config_with(vec![TriggerSet::new(Engine::Bing, ["BING "])]);
        let result = classify("  bing weather tomorrow ", &config);

        assert_eq!(result.engine, Engine::Bing);
        assert_eq!(result.cleaned_query, "weather tomorrow");
    }

    #[test]
    fn test_every_default_engine_has_reachable_trigger() {
        let config = ClassifierConfig::default();
        for set in &config.engine_triggers {
            for trigger in &set.triggers {
                let input = format!("{}rust lifetimes", trigger);
                let result = classify(&input, &config);
                assert_eq!(result.engine, set.engine, "trigger {:?}", trigger);
                assert_eq!(result.cleaned_query, "rust lifetimes");
            }
        }
    }

    #[test]
    fn test_trigger_without_separator() {
        let config = ClassifierConfig::default();
        let result = classify("解释量子计算", &config);

        assert_eq!(result.engine, Engine::ChatGpt);
        assert_eq!(result.cleaned_query, "量子计算");

        let result = classify("搜索 天气", &config);
        assert_eq!(result.engine, Engine::Google);
        assert_eq!(result.cleaned_query, "天气");
    }

    #[test]
    fn test_longest_trigger_wins_within_engine() {
        let config = config_with(vec![TriggerSet::new(
            Engine::ChatGpt,
            ["chat", "chatgpt "],
        )]);
        let result = classify("chatgpt explain monads", &config);

        assert_eq!(result.matched_trigger.as_deref(), Some("chatgpt "));
        assert_eq!(result.cleaned_query, "explain monads");
    }

    #[test]
    fn test_priority_order_across_engines() {
        let sets = vec![
            TriggerSet::new(Engine::Perplexity, ["p "]),
            TriggerSet::new(Engine::ChatGpt, ["p "]),
        ];
        let result = classify("p rust", &config_with(sets));
        assert_eq!(result.engine, Engine::Perplexity);

        // The earlier engine wins even when a later one has a longer trigger
        let sets = vec![
            TriggerSet::new(Engine::Google, ["g"]),
            TriggerSet::new(Engine::ChatGpt, ["gpt "]),
        ];
        let result = classify("gpt rust", &config_with(sets));
        assert_eq!(result.engine, Engine::Google);
        assert_eq!(result.cleaned_query, "pt rust");
    }

    #[test]
    fn test_word_threshold_boundary() {
        let config = config_with(Vec::new());

        let short = classify("one two three four five", &config);
        assert_eq!(short.engine, Engine::Google);
        assert_eq!(short.word_count, Some(5));

        let long = classify("one two three four five six", &config);
        assert_eq!(long.engine, Engine::ChatGpt);
        assert_eq!(long.word_count, Some(6));
    }

    #[test]
    fn test_dense_script_counts_toward_threshold() {
        let config = config_with(Vec::new());
        assert_eq!(classify("你好世界", &config).engine, Engine::Google);
        assert_eq!(classify("为什么天空是蓝色", &config).engine, Engine::ChatGpt);
    }

    #[test]
    fn test_empty_query_routes_short() {
        let config = ClassifierConfig::default();

        for input in ["", "   "] {
            let result = classify(input, &config);
            assert_eq!(result.engine, Engine::Google);
            assert_eq!(result.cleaned_query, "");
            assert_eq!(result.word_count, Some(0));
        }

        assert_eq!(classify_opt(None, &config), classify("", &config));
    }

    #[test]
    fn test_cleaned_query_does_not_retrigger() {
        let config = ClassifierConfig::default();
        let first = classify("chat what is a monad", &config);
        let second = classify(&first.cleaned_query, &config);

        assert_eq!(first.matched_trigger.as_deref(), Some("chat "));
        assert_eq!(second.matched_trigger, None);
        assert_eq!(second.cleaned_query, first.cleaned_query);
    }

    #[test]
    fn test_trigger_requires_full_prefix() {
        let config = ClassifierConfig::default();
        // "chat" alone lacks the trailing space of "chat "
        let result = classify("chat", &config);
        assert_eq!(result.matched_trigger, None);
        assert_eq!(result.engine, Engine::Google);

        let result = classify("chatter box", &config);
        assert_eq!(result.matched_trigger, None);
    }

    #[test]
    fn test_empty_trigger_never_matches() {
        let config = config_with(vec![TriggerSet::new(Engine::Bing, [""])]);
        let result = classify("rust", &config);
        assert_eq!(result.matched_trigger, None);
    }

    #[test]
    fn test_prefix_len_respects_char_boundaries() {
        assert_eq!(prefix_len_ignore_case("ÉCOLE x", "école "), Some("ÉCOLE ".len()));
        assert_eq!(prefix_len_ignore_case("讲讲历史", "讲讲"), Some("讲讲".len()));
        assert_eq!(prefix_len_ignore_case("ab", "abc"), None);
        assert_eq!(prefix_len_ignore_case("abd", "abc"), None);
    }

    #[test]
    fn test_greek_final_sigma_trigger() {
        let config = config_with(vec![TriggerSet::new(Engine::Bing, ["ΟΔΟΣ "])]);

        let upper = classify("ΟΔΟΣ athens", &config);
        assert_eq!(upper.engine, Engine::Bing);
        assert_eq!(upper.cleaned_query, "athens");

        let lower = classify("οδοσ athens", &config);
        assert_eq!(lower.engine, Engine::Bing);
        assert_eq!(lower.cleaned_query, "athens");
    }

    #[test]
    fn test_destination_url() {
        let config = ClassifierConfig::default();
        let result = classify("pplx rust async", &config);
        assert_eq!(
            result.destination_url(),
            "https://www.perplexity.ai/search?q=rust%20async"
        );
    }
}
