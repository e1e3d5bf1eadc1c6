//! # smart-search Core
//!
//! Core library for smart-search - routes search queries either to Google or
//! to an AI chat engine.
//!
//! The [`classifier`] decides where a query goes from explicit trigger
//! prefixes and a script-aware word count. The remaining modules are the
//! plumbing around it: settings persistence and editing, navigation routing,
//! destination URLs and search suggestions.

// Core modules
pub mod classifier;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod settings;
pub mod suggest;

// Re-export commonly used types
pub use classifier::{classify, classify_opt, word_count, Classification};
pub use config::{ClassifierConfig, TriggerSet};
pub use editor::{DebouncedSaver, SettingsForm};
pub use engine::Engine;
pub use navigation::{NavigationRouter, RouteDecision, SkipReason};
pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore};
pub use suggest::{SuggestClient, Suggestions};

/// Initialize tracing to stderr
///
/// `RUST_LOG` wins when set; otherwise `debug` in verbose mode and `warn`
/// elsewhere, keeping stdout free for command output.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
