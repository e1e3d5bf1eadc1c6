//! Query classification command

use anyhow::Result;
use smart_search_core::classify;
use tracing::info;

use crate::config::CliConfigLoader;
use crate::output;

/// Classify a query and show where it would go
pub async fn classify_command(query: String, config_loader: CliConfigLoader, json: bool) -> Result<()> {
    info!("Classifying query: {}", query);

    let config = config_loader.load().await?;
    let classification = classify(&query, &config);

    if json {
        output::print_json(&serde_json::json!({
            "engine": classification.engine,
            "cleaned_query": classification.cleaned_query,
            "matched_trigger": classification.matched_trigger,
            "word_count": classification.word_count,
            "url": classification.destination_url(),
        }))
    } else {
        output::print_classification(&classification);
        Ok(())
    }
}
