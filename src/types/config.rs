//! Configuration structures.
//!
//! Every section defaults, so `Config::default()` decodes exactly the three
//! standard envelope shapes and logs unrecognized payloads.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Error, Result};

/// `source` value the event bus stamps on its own deliveries.
pub const DEFAULT_EVENT_BUS_SOURCE: &str = "aws.events";

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Envelope decoder configuration.
    #[serde(default)]
    pub decoder: DecoderConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from a JSON file. Missing sections take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::config(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

/// Envelope decoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Top-level `source` values that mark an event-bus envelope.
    pub event_bus_sources: Vec<String>,

    /// Emit a diagnostic carrying the raw payload when no envelope matches.
    pub log_unknown: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            event_bus_sources: vec![DEFAULT_EVENT_BUS_SOURCE.to_string()],
            log_unknown: true,
        }
    }
}

impl DecoderConfig {
    pub fn is_event_bus_source(&self, source: &str) -> bool {
        self.event_bus_sources.iter().any(|s| s == source)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
