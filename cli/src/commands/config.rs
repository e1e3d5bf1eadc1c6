//! Settings inspection and editing commands

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use smart_search_core::{Engine, JsonFileStore, Settings, SettingsForm, SettingsStore};
use tracing::{info, warn};

use crate::config::CliConfigLoader;
use crate::output;

/// Settings actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings as JSON
    Show,

    /// Print the settings file path
    Path,

    /// Edit settings fields
    Set(SetArgs),

    /// Restore the built-in defaults
    Reset,
}

/// Editable fields; trigger lists take one trigger per line
#[derive(Args, Debug)]
pub struct SetArgs {
    /// ChatGPT triggers, newline separated
    #[arg(long)]
    pub chatgpt_triggers: Option<String>,

    /// Perplexity triggers, newline separated
    #[arg(long)]
    pub perplexity_triggers: Option<String>,

    /// Bing triggers, newline separated
    #[arg(long)]
    pub bing_triggers: Option<String>,

    /// Google triggers, newline separated
    #[arg(long)]
    pub google_triggers: Option<String>,

    /// Minimum word count for the long-query engine
    #[arg(long)]
    pub word_threshold: Option<String>,

    /// Engine for long queries without a trigger
    #[arg(long)]
    pub long_query_engine: Option<String>,

    /// Engine for short queries without a trigger
    #[arg(long)]
    pub short_query_engine: Option<String>,
}

impl SetArgs {
    /// Apply the given fields to a form
    fn apply(self, form: &mut SettingsForm) {
        let triggers = [
            (Engine::ChatGpt, self.chatgpt_triggers),
            (Engine::Perplexity, self.perplexity_triggers),
            (Engine::Bing, self.bing_triggers),
            (Engine::Google, self.google_triggers),
        ];
        for (engine, text) in triggers {
            if let Some(text) = text {
                form.set_triggers_text(engine, text);
            }
        }

        if let Some(threshold) = self.word_threshold {
            form.word_threshold = threshold;
        }
        if let Some(engine) = self.long_query_engine {
            form.long_query_engine = engine;
        }
        if let Some(engine) = self.short_query_engine {
            form.short_query_engine = engine;
        }
    }
}

/// Run a settings action
pub async fn config_command(action: ConfigAction, config_loader: CliConfigLoader) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let loaded = config_loader.load_base().await?;
            info!("Settings source: {}", loaded.source);
            let effective = Settings {
                classifier: config_loader.load().await?,
                ..loaded.settings
            };
            output::print_json(&effective)
        }
        ConfigAction::Path => {
            println!("{}", config_loader.settings_path()?.display());
            Ok(())
        }
        ConfigAction::Set(args) => {
            let path = config_loader.settings_path()?;
            // A file that exists but does not parse is never overwritten
            let current = JsonFileStore::new(&path)
                .read()
                .await
                .with_context(|| format!("Failed to read settings from: {}", path.display()))?
                .unwrap_or_default();
            let mut form = SettingsForm::from_settings(&current);
            args.apply(&mut form);

            let settings = match form.parse() {
                Ok(settings) => settings,
                Err(e) => {
                    // The form reset the offending field; nothing is written
                    warn!("Rejected settings edit: {}", e);
                    return Err(anyhow!("{}; settings not saved", e));
                }
            };

            save(&config_loader, &settings).await
        }
        ConfigAction::Reset => save(&config_loader, &Settings::default()).await,
    }
}

async fn save(config_loader: &CliConfigLoader, settings: &Settings) -> Result<()> {
    let path = config_loader.settings_path()?;
    JsonFileStore::new(&path)
        .save(settings)
        .await
        .with_context(|| format!("Failed to save settings to: {}", path.display()))?;

    info!("Saved settings to {}", path.display());
    println!("{}", path.display());
    Ok(())
}
