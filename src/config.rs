//! Presentation and timing settings.
//!
//! Defaults are the shipped game. A page may override them with an inline
//! `<script type="application/json" id="counter-quest-config">` block; the
//! difficulty ramp itself lives in `model` and is not configurable.

use serde::{Deserialize, Serialize};
use tracing::Level;
use web_sys::Document;

use crate::error::ConfigError;

pub const CONFIG_ELEMENT_ID: &str = "counter-quest-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub setback_interval_ms: u32,
    /// Delay between reaching the target and the next level.
    pub advance_delay_ms: u32,
    /// Delay between game over and the automatic reset.
    pub game_over_reset_ms: u32,
    pub toast_ms: u32,
    pub celebrate_ms: u32,
    /// `KeyboardEvent.code` values that count as an increment.
    pub increment_keys: Vec<String>,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            setback_interval_ms: 2500,
            advance_delay_ms: 900,
            game_over_reset_ms: 900,
            toast_ms: 1100,
            celebrate_ms: 800,
            increment_keys: vec!["Space".to_string(), "Enter".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("setback_interval_ms", self.setback_interval_ms),
            ("advance_delay_ms", self.advance_delay_ms),
            ("game_over_reset_ms", self.game_over_reset_ms),
            ("toast_ms", self.toast_ms),
            ("celebrate_ms", self.celebrate_ms),
        ];
        if let Some(&(field, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::InvalidInterval { field });
        }
        if self.increment_keys.is_empty() {
            return Err(ConfigError::NoIncrementKeys);
        }
        self.max_level()?;
        Ok(())
    }

    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::UnknownLogLevel { level: self.log_level.clone() })
    }

    pub fn is_increment_key(&self, code: &str) -> bool {
        self.increment_keys.iter().any(|k| k == code)
    }

    /// Reads the inline config block. A page without one gets the defaults.
    pub fn load(document: &Document) -> Result<Self, ConfigError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}
