//! Settings editing: form validation and debounced autosave

use crate::config::{ClassifierConfig, DEFAULT_WORD_THRESHOLD};
use crate::engine::Engine;
use crate::error::{ConfigError, Result};
use crate::settings::{Settings, SettingsStore};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default delay between the last edit and the write
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Raw trigger text for one engine, one trigger per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerField {
    pub engine: Engine,
    pub text: String,
}

/// Settings as free-form text fields, the way a user edits them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Trigger blocks in priority order
    pub triggers: Vec<TriggerField>,
    pub word_threshold: String,
    pub long_query_engine: String,
    pub short_query_engine: String,
}

impl SettingsForm {
    /// Render settings into editable fields
    pub fn from_settings(settings: &Settings) -> Self {
        let config = &settings.classifier;
        Self {
            triggers: config
                .engine_triggers
                .iter()
                .map(|set| TriggerField {
                    engine: set.engine,
                    text: set.triggers.join("\n"),
                })
                .collect(),
            word_threshold: config.word_threshold.to_string(),
            long_query_engine: config.default_long_query_engine.to_string(),
            short_query_engine: config.default_short_query_engine.to_string(),
        }
    }

    /// Replace the trigger text of an engine
    pub fn set_triggers_text(&mut self, engine: Engine, text: impl Into<String>) {
        let text = text.into();
        match self.triggers.iter_mut().find(|field| field.engine == engine) {
            Some(field) => field.text = text,
            None => self.triggers.push(TriggerField { engine, text }),
        }
    }

    /// Parse the fields into settings
    ///
    /// An invalid field is reset to its default and the parse fails, so the
    /// caller skips the save.
    pub fn parse(&mut self) -> std::result::Result<Settings, ConfigError> {
        let word_threshold = match self.word_threshold.trim().parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                let value = std::mem::replace(
                    &mut self.word_threshold,
                    DEFAULT_WORD_THRESHOLD.to_string(),
                );
                return Err(ConfigError::InvalidValue {
                    field: "word_threshold".to_string(),
                    value,
                });
            }
        };

        let defaults = ClassifierConfig::default();
        let long = parse_engine_field(
            &mut self.long_query_engine,
            defaults.default_long_query_engine,
        )?;
        let short = parse_engine_field(
            &mut self.short_query_engine,
            defaults.default_short_query_engine,
        )?;

        let mut config = ClassifierConfig {
            engine_triggers: Vec::new(),
            word_threshold,
            default_long_query_engine: long,
            default_short_query_engine: short,
        };
        for field in &self.triggers {
            config.set_triggers(field.engine, split_triggers(&field.text));
        }

        Ok(Settings::new(config))
    }
}

fn parse_engine_field(
    field: &mut String,
    default: Engine,
) -> std::result::Result<Engine, ConfigError> {
    match field.parse::<Engine>() {
        Ok(engine) => Ok(engine),
        Err(e) => {
            *field = default.to_string();
            Err(e)
        }
    }
}

/// Split a trigger block into triggers
///
/// Only empty lines are dropped; trailing spaces are part of the trigger.
pub fn split_triggers(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes settings after a quiet period, keeping only the latest value
///
/// Each `schedule` cancels the write scheduled before it. Must be used from
/// within a tokio runtime.
pub struct DebouncedSaver<S: SettingsStore + 'static> {
    store: Arc<S>,
    delay: Duration,
    slot: Arc<Mutex<Option<Settings>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: SettingsStore + 'static> DebouncedSaver<S> {
    /// Create a saver with the default delay
    pub fn new(store: Arc<S>) -> Self {
        Self::with_delay(store, DEFAULT_DEBOUNCE)
    }

    /// Create a saver with a custom delay
    pub fn with_delay(store: Arc<S>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            slot: Arc::new(Mutex::new(None)),
            task: Mutex::new(None),
        }
    }

    /// Schedule a write, replacing any pending one
    pub fn schedule(&self, settings: Settings) {
        self.abort_task();
        *lock(&*self.slot) = Some(settings);

        let store = Arc::clone(&self.store);
        let slot = Arc::clone(&self.slot);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let pending = lock(&*slot).take();
            if let Some(settings) = pending {
                match store.save(&settings).await {
                    Ok(()) => debug!("Debounced settings write completed"),
                    Err(e) => warn!(error = %e, "Debounced settings write failed"),
                }
            }
        });

        *lock(&self.task) = Some(handle);
    }

    /// Whether a write is waiting for its delay to pass
    pub fn is_pending(&self) -> bool {
        lock(&*self.slot).is_some()
    }

    /// Write the pending settings now, if any
    pub async fn flush(&self) -> Result<bool> {
        self.abort_task();
        let pending = lock(&*self.slot).take();
        match pending {
            Some(settings) => {
                self.store.save(&settings).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the pending write
    pub fn cancel(&self) {
        self.abort_task();
        lock(&*self.slot).take();
    }

    fn abort_task(&self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }
    }
}

// A poisoned lock only means a writer panicked mid-assignment of an Option
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
