//! Persisted settings and the stores that hold them

use crate::config::ClassifierConfig;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Current settings file version
pub const SETTINGS_VERSION: u32 = 1;

/// The single persisted settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Settings format version for compatibility
    pub version: u32,

    /// When the settings were last saved
    pub updated_at: Option<DateTime<Utc>>,

    /// Classifier configuration
    #[serde(flatten)]
    pub classifier: ClassifierConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            updated_at: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Settings {
    /// Wrap a classifier configuration
    pub fn new(classifier: ClassifierConfig) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }
}

/// A key-value style store holding one settings record
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings, falling back to the built-in defaults
    async fn load(&self) -> Settings;

    /// Validate and persist settings
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Get the default settings file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("smart-search");
        path.push("settings.json");
        path
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the backing file
    pub async fn read(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let settings = serde_json::from_str(&content)?;
        Ok(Some(settings))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self) -> Settings {
        match self.read().await {
            Ok(Some(settings)) => {
                debug!(path = %self.path.display(), "Loaded settings");
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable settings, using defaults");
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        settings.classifier.validate()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut stamped = settings.clone();
        stamped.updated_at = Some(Utc::now());

        let content = serde_json::to_string_pretty(&stamped)?;
        fs::write(&self.path, content).await?;

        debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: RwLock<Option<Settings>>,
    saves: RwLock<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Settings {
        self.settings.read().await.clone().unwrap_or_default()
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        settings.classifier.validate()?;

        let mut stamped = settings.clone();
        stamped.updated_at = Some(Utc::now());
        *self.settings.write().await = Some(stamped);
        *self.saves.write().await += 1;
        Ok(())
    }
}
