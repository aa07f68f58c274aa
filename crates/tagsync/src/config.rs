//! Tagger configuration loading from JSON
//!
//! All fields are optional:
//!
//! ```json
//! {
//!   "tags": { "team": "storage" },
//!   "marker_key": "services.k8s.aws/managed-by",
//!   "marker_value": "aws-controllers-k8s",
//!   "mode": "additive"
//! }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tagsync_common::defaults::{default_marker_key, default_marker_value};
use tagsync_common::{DesiredTags, ManagementMarker, SyncMode};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// marker_key field is empty
    #[error("marker_key cannot be empty")]
    EmptyMarkerKey,

    /// A desired tag has an empty key
    #[error("tag keys cannot be empty")]
    EmptyTagKey,

    /// A `key=value` tag argument has no `=`
    #[error("tag must be in 'key=value' form, got: {0}")]
    InvalidTagArg(String),

    /// Failed to parse JSON configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read configuration file
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Desired tags, management marker and sync mode for a tagger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaggerConfig {
    /// Tags to apply to the resource
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Management marker tag key
    #[serde(default = "default_marker_key")]
    pub marker_key: String,

    /// Management marker value, used when `tags` does not set the key
    #[serde(default = "default_marker_value")]
    pub marker_value: String,

    /// Whether undesired tags are removed
    #[serde(default)]
    pub mode: SyncMode,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            tags: HashMap::new(),
            marker_key: default_marker_key(),
            marker_value: default_marker_value(),
            mode: SyncMode::default(),
        }
    }
}

impl TaggerConfig {
    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker_key.is_empty() {
            return Err(ConfigError::EmptyMarkerKey);
        }
        if self.tags.keys().any(|k| k.is_empty()) {
            return Err(ConfigError::EmptyTagKey);
        }
        Ok(())
    }

    pub fn marker(&self) -> ManagementMarker {
        ManagementMarker::new(&self.marker_key, &self.marker_value)
    }

    /// Build the desired tag set, injecting the marker if absent
    pub fn into_desired_tags(self) -> DesiredTags {
        let marker = self.marker();
        DesiredTags::with_marker(self.tags, &marker)
    }
}

/// Parse a `key=value` tag argument. The value may be empty.
pub fn parse_tag_arg(s: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidTagArg(s.to_string()))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::EmptyTagKey);
    }
    Ok((key.to_string(), value.to_string()))
}
