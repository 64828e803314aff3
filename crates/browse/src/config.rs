//! Engine configuration.
//!
//! Defaults match the reference behaviour: 20 items per page, a 100-item
//! scroll window, a 250ms keystroke debounce and a 150ms blur grace.

use crate::error::BrowseError;
use catalog::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub items_per_page: u32,
    /// Initial size of the visible window and the amount it grows by
    pub window_increment: usize,
    pub debounce_ms: u64,
    /// How long the suggestion list stays open after the input loses focus
    pub blur_grace_ms: u64,
    pub suggestion_limit: usize,
    /// Collection name passed to count queries
    pub collection: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            items_per_page: 20,
            window_increment: 100,
            debounce_ms: 250,
            blur_grace_ms: 150,
            suggestion_limit: 10,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl BrowseConfig {
    /// Load a config from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, BrowseError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BrowseError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, BrowseError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| BrowseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BrowseError> {
        if self.items_per_page == 0 {
            return Err(BrowseError::InvalidConfig(
                "items_per_page must be greater than zero".to_string(),
            ));
        }
        if self.window_increment == 0 {
            return Err(BrowseError::InvalidConfig(
                "window_increment must be greater than zero".to_string(),
            ));
        }
        if self.collection.trim().is_empty() {
            return Err(BrowseError::InvalidConfig(
                "collection must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}
