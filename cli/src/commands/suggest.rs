//! Search suggestion command

use anyhow::Result;
use smart_search_core::SuggestClient;
use tracing::info;

use crate::output;

/// Fetch suggestions for a partial query
pub async fn suggest_command(query: String, base_url: Option<String>) -> Result<()> {
    info!("Fetching suggestions for: {}", query);

    let client = match base_url {
        Some(url) => SuggestClient::with_base_url(url),
        None => SuggestClient::new(),
    };

    let suggestions = client.suggest(&query).await;
    output::print_json(&suggestions.to_json())
}
