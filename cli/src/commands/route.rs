//! Single navigation routing command

use anyhow::Result;
use smart_search_core::NavigationRouter;
use tracing::info;

use crate::config::CliConfigLoader;
use crate::output;

/// Route one search URL
pub async fn route_command(url: String, config_loader: CliConfigLoader, json: bool) -> Result<()> {
    info!("Routing navigation: {}", url);

    let router = NavigationRouter::new(config_loader.load().await?);
    let decision = router.route(&url);

    if json {
        output::print_json(&decision)
    } else {
        output::print_decision(&decision);
        Ok(())
    }
}
