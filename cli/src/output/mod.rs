//! CLI output formatting
//!
//! Human readable output is colored; `--json` output and redirect URLs are
//! printed plain so they can be piped.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use smart_search_core::{Classification, Engine, RouteDecision};

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Colored engine label
pub fn engine_label(engine: Engine) -> String {
    let name = engine.display_name();
    match engine {
        Engine::Google => name.blue().bold().to_string(),
        Engine::ChatGpt => name.green().bold().to_string(),
        Engine::Perplexity => name.cyan().bold().to_string(),
        Engine::Bing => name.yellow().bold().to_string(),
    }
}

/// Print a classification
pub fn print_classification(classification: &Classification) {
    println!("{:<10}{}", "engine:".dimmed(), engine_label(classification.engine));
    println!("{:<10}{}", "query:".dimmed(), classification.cleaned_query);

    match (&classification.matched_trigger, classification.word_count) {
        (Some(trigger), _) => println!("{:<10}{:?}", "trigger:".dimmed(), trigger),
        (None, Some(count)) => println!("{:<10}{} words", "rule:".dimmed(), count),
        (None, None) => {}
    }

    println!("{:<10}{}", "url:".dimmed(), classification.destination_url());
}

/// Print a navigation decision
pub fn print_decision(decision: &RouteDecision) {
    match decision {
        RouteDecision::Redirect {
            url,
            classification,
        } => {
            println!("{} {}", "→".green(), engine_label(classification.engine));
            println!("{}", url);
        }
        RouteDecision::Skip { reason } => {
            println!("{} {}", "skip:".yellow(), reason);
        }
    }
}
