//! Minimal configuration module for smart-search core
//!
//! Only exports pure data types. All discovery and merging is in CLI layer.

pub mod types;

pub use types::{ClassifierConfig, TriggerSet, DEFAULT_WORD_THRESHOLD};
