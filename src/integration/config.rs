//! Configuration for the chat widget
//!
//! Provides centralized configuration for all components, loadable from TOML.

use crate::responder::{RuleEntry, RuleTable};
use crate::speech::SpeechConfig;
use crate::utils::SpeechChannels;
use crate::{ChatError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Configuration for the complete widget
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Speech synthesis and recognition settings
    pub speech: SpeechConfig,

    /// Replacement rule table; the built-in portfolio table when absent
    pub rules: Option<Vec<RuleEntry>>,

    /// Capacity of the capability event queue
    pub event_queue_size: usize,

    /// Whether the panel starts expanded
    pub start_open: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            speech: SpeechConfig::default(),
            rules: None,
            event_queue_size: 64,
            start_open: false,
        }
    }
}

impl ChatConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| ChatError::ConfigError(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the speech configuration
    pub fn with_speech(mut self, speech: SpeechConfig) -> Self {
        self.speech = speech;
        self
    }

    /// Replace the rule table
    pub fn with_rules(mut self, rules: &RuleTable) -> Self {
        self.rules = Some(rules.entries().to_vec());
        self
    }

    /// Set the event queue capacity
    pub fn with_event_queue_size(mut self, size: usize) -> Self {
        self.event_queue_size = size;
        self
    }

    /// Start with the panel expanded
    pub fn opened(mut self) -> Self {
        self.start_open = true;
        self
    }

    /// Event channels sized by `event_queue_size`
    pub fn channels(&self) -> SpeechChannels {
        SpeechChannels::new(self.event_queue_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.speech.validate()?;

        if self.event_queue_size == 0 {
            return Err(ChatError::ConfigError(
                "Event queue size must be positive".into(),
            ));
        }

        if let Some(rules) = &self.rules {
            RuleTable::new(rules.clone())?;
        }

        Ok(())
    }

    /// The configured rule table, or the built-in one
    pub fn rule_table(&self) -> Result<RuleTable> {
        match &self.rules {
            Some(rules) => RuleTable::new(rules.clone()),
            None => Ok(RuleTable::portfolio()),
        }
    }
}
