//! # smart-search CLI
//!
//! Command-line interface for smart-search - routes search queries to Google
//! or an AI chat engine.
//!
//! ## Usage
//!
//! - `smart-search classify "chat what is rust"` - Show where a query goes
//! - `smart-search route <url>` - Route one Google search navigation
//! - `smart-search filter` - Route navigations read line by line from stdin
//! - `smart-search count <text>` - Script-aware word count
//! - `smart-search suggest <query>` - Search suggestions as JSON
//! - `smart-search config show|path|set|reset` - Inspect and edit settings

use anyhow::Result;
use clap::{Parser, Subcommand};
use smart_search_core::Engine;
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    classify_command, config_command, count_command, filter_command, route_command,
    suggest_command, ConfigAction,
};
use config::CliConfigLoader;

/// smart-search - Route search queries to Google or an AI chat engine
#[derive(Parser)]
#[command(name = "smart-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Route search queries to Google or an AI chat engine")]
#[command(long_about = None)]
struct Cli {
    /// Settings file or directory path
    #[arg(short, long, env = "SMART_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Word threshold override
    #[arg(long, env = "SMART_SEARCH_WORD_THRESHOLD", value_parser = clap::value_parser!(u32).range(1..))]
    threshold: Option<u32>,

    /// Engine for long queries without a trigger (google, chatgpt, perplexity, bing)
    #[arg(long, env = "SMART_SEARCH_LONG_ENGINE")]
    long_engine: Option<Engine>,

    /// Engine for short queries without a trigger (google, chatgpt, perplexity, bing)
    #[arg(long, env = "SMART_SEARCH_SHORT_ENGINE")]
    short_engine: Option<Engine>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which engine a query goes to
    Classify {
        /// The query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Count the words of a text
    Count {
        /// The text to count
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Route a single search URL
    Route {
        /// The outgoing navigation URL
        url: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Route URLs read line by line from stdin
    Filter,

    /// Fetch search suggestions
    Suggest {
        /// The partial query
        #[arg(num_args = 0..)]
        query: Vec<String>,

        /// Suggestion service base URL
        #[arg(long, hide = true)]
        base_url: Option<String>,
    },

    /// Inspect or edit settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(threshold) = cli.threshold {
        loader = loader.with_threshold_override(threshold);
    }

    if let Some(engine) = cli.long_engine {
        loader = loader.with_long_engine_override(engine);
    }

    if let Some(engine) = cli.short_engine {
        loader = loader.with_short_engine_override(engine);
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    smart_search_core::init_tracing(cli.verbose);

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match cli.command {
        Commands::Classify { query, json } => {
            classify_command(query.join(" "), config_loader, json).await
        }
        Commands::Count { text } => count_command(text.join(" ")).await,
        Commands::Route { url, json } => route_command(url, config_loader, json).await,
        Commands::Filter => filter_command(config_loader).await,
        Commands::Suggest { query, base_url } => suggest_command(query.join(" "), base_url).await,
        Commands::Config { action } => config_command(action, config_loader).await,
    }
}
