//! Simple CLI settings loader for smart-search
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./smart-search.json or ./.smart-search/settings.json
//! 3. XDG config: $XDG_CONFIG_HOME/smart-search/settings.json or the platform config dir
//! 4. Built-in defaults (no files)
//!
//! Environment overrides arrive through the clap flags they back.

use anyhow::{anyhow, Context, Result};
use smart_search_core::{ClassifierConfig, Engine, JsonFileStore, Settings, SettingsStore};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

const CWD_FILE: &str = "smart-search.json";
const APP_DIR: &str = "smart-search";
const SETTINGS_FILE: &str = "settings.json";

/// Where the loaded settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// A settings file on disk
    File(PathBuf),
    /// Built-in defaults
    Defaults,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::File(path) => write!(f, "{}", path.display()),
            SettingsSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Settings together with their origin
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: SettingsSource,
}

/// CLI settings loader
#[derive(Debug, Clone, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    threshold_override: Option<u32>,
    long_engine_override: Option<Engine>,
    short_engine_override: Option<Engine>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(expand_path(&path));
        self
    }

    /// Set word threshold override
    pub fn with_threshold_override(mut self, threshold: u32) -> Self {
        self.threshold_override = Some(threshold);
        self
    }

    /// Set long-query engine override
    pub fn with_long_engine_override(mut self, engine: Engine) -> Self {
        self.long_engine_override = Some(engine);
        self
    }

    /// Set short-query engine override
    pub fn with_short_engine_override(mut self, engine: Engine) -> Self {
        self.short_engine_override = Some(engine);
        self
    }

    /// Load settings and apply overrides, producing a validated config
    pub async fn load(&self) -> Result<ClassifierConfig> {
        let loaded = self.load_base().await?;
        debug!(source = %loaded.source, "Resolved settings");

        let mut config = loaded.settings.classifier;
        if let Some(threshold) = self.threshold_override {
            config.word_threshold = threshold;
        }
        if let Some(engine) = self.long_engine_override {
            config.default_long_query_engine = engine;
        }
        if let Some(engine) = self.short_engine_override {
            config.default_short_query_engine = engine;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Load settings without flag overrides
    pub async fn load_base(&self) -> Result<LoadedSettings> {
        if let Some(override_path) = &self.config_override {
            let path = resolve_override(override_path)?;
            let settings = JsonFileStore::new(&path)
                .read()
                .await
                .with_context(|| format!("Failed to load settings from: {}", path.display()))?
                .ok_or_else(|| anyhow!("Settings file does not exist: {}", path.display()))?;
            return Ok(LoadedSettings {
                settings,
                source: SettingsSource::File(path),
            });
        }

        // Search in priority order
        for path in self.candidate_paths()? {
            if path.exists() {
                // Discovered files degrade to defaults when unreadable
                let settings = JsonFileStore::new(&path).load().await;
                return Ok(LoadedSettings {
                    settings,
                    source: SettingsSource::File(path),
                });
            }
        }

        Ok(LoadedSettings {
            settings: Settings::default(),
            source: SettingsSource::Defaults,
        })
    }

    /// File that `config set` writes to
    ///
    /// The override if given, else the first existing candidate, else the
    /// user config directory.
    pub fn settings_path(&self) -> Result<PathBuf> {
        if let Some(override_path) = &self.config_override {
            return Ok(if override_path.is_dir() {
                override_path.join(SETTINGS_FILE)
            } else {
                override_path.clone()
            });
        }

        let candidates = self.candidate_paths()?;
        if let Some(existing) = candidates.iter().find(|p| p.exists()) {
            return Ok(existing.clone());
        }

        Ok(xdg_settings_path().unwrap_or_else(JsonFileStore::default_path))
    }

    /// Candidate settings files in priority order
    fn candidate_paths(&self) -> Result<Vec<PathBuf>> {
        let cwd = std::env::current_dir()?;

        let mut paths = vec![
            cwd.join(CWD_FILE),
            cwd.join(format!(".{}", APP_DIR)).join(SETTINGS_FILE),
        ];
        if let Some(xdg) = xdg_settings_path() {
            paths.push(xdg);
        }
        Ok(paths)
    }
}

/// Resolve an explicit --config path to a file
fn resolve_override(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else if path.is_dir() {
        let config_file = path.join(SETTINGS_FILE);
        if config_file.exists() {
            Ok(config_file)
        } else {
            Err(anyhow!(
                "No {} found in directory: {}",
                SETTINGS_FILE,
                path.display()
            ))
        }
    } else {
        Err(anyhow!("Config path does not exist: {}", path.display()))
    }
}

/// Settings file under the XDG config directory
fn xdg_settings_path() -> Option<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()?,
    };
    Some(base.join(APP_DIR).join(SETTINGS_FILE))
}

/// Expand `~` and environment variables in a user supplied path
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_override_file_with_flags() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");
        tokio::fs::write(&path, r#"{ "word_threshold": 3 }"#).await.unwrap();

        let loader = CliConfigLoader::new()
            .with_config_override(path.clone())
            .with_short_engine_override(Engine::Bing);

        let loaded = loader.load_base().await.unwrap();
        assert_eq!(loaded.source, SettingsSource::File(path));

        let config = loader.load().await.unwrap();
        assert_eq!(config.word_threshold, 3);
        assert_eq!(config.default_short_query_engine, Engine::Bing);
    }

    #[tokio::test]
    async fn test_override_directory() {
        let temp_dir = tempdir().unwrap();
        let loader = CliConfigLoader::new().with_config_override(temp_dir.path().to_path_buf());

        assert!(loader.load().await.is_err());
        assert_eq!(
            loader.settings_path().unwrap(),
            temp_dir.path().join(SETTINGS_FILE)
        );

        tokio::fs::write(temp_dir.path().join(SETTINGS_FILE), r#"{ "word_threshold": 8 }"#)
            .await
            .unwrap();
        assert_eq!(loader.load().await.unwrap().word_threshold, 8);
    }

    #[tokio::test]
    async fn test_malformed_override_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        tokio::fs::write(&path, "[1, 2").await.unwrap();

        let loader = CliConfigLoader::new().with_config_override(path);
        assert!(loader.load().await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_override_threshold_fails_validation() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        tokio::fs::write(&path, "{}").await.unwrap();

        let loader = CliConfigLoader::new()
            .with_config_override(path)
            .with_threshold_override(0);
        assert!(loader.load().await.is_err());
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path(Path::new("~/settings.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("settings.json"));
        }
    }
}
