//! Compositor configuration module
//!
//! Settings for pass sinks and pass-generation diagnostics, stored as RON.

mod manager;

pub use manager::{ConfigError, ConfigManager, ConfigResult};

use serde::{Deserialize, Serialize};

/// Storage settings for accumulating sinks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SinkConfig {
    /// Upper bound on stored passes per cycle (None = unbounded)
    pub max_passes: Option<usize>,
    /// Slots reserved up front when a sink is created
    pub initial_capacity: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_passes: None,
            initial_capacity: 4,
        }
    }
}

/// Diagnostics recorded by forwarding sinks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Emit a trace event for every forwarded pass
    pub trace_passes: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { trace_passes: true }
    }
}

/// Complete compositor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CompositorConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl CompositorConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    /// Parse a configuration from RON text
    pub fn from_ron(content: &str) -> ConfigResult<Self> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize the configuration to pretty RON text
    pub fn to_ron(&self) -> ConfigResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
