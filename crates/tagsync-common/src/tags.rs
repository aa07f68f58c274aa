//! Desired tag set and management marker
//!
//! Every managed resource carries the management marker tag so that it can
//! be told apart from resources owned by something else.
//!
//! ## Tag Schema
//!
//! | Tag Key | Description |
//! |---------|-------------|
//! | `services.k8s.aws/managed-by` | Static identifier ("aws-controllers-k8s") |
//!
//! Keys prefixed with `aws:` belong to AWS and are never removed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag key marking a resource as managed - all synced resources have this
pub const MANAGED_BY_TAG_KEY: &str = "services.k8s.aws/managed-by";

/// Default value for the management marker tag
pub const MANAGED_BY_TAG_VALUE: &str = "aws-controllers-k8s";

/// Prefix of AWS-owned tag keys
pub const RESERVED_TAG_PREFIX: &str = "aws:";

/// The management-marker key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementMarker {
    pub key: String,
    pub value: String,
}

impl ManagementMarker {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Default for ManagementMarker {
    fn default() -> Self {
        Self::new(MANAGED_BY_TAG_KEY, MANAGED_BY_TAG_VALUE)
    }
}

/// How a sync treats tags that are on the resource but not desired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Apply desired tags only; existing extra tags are left untouched
    #[default]
    Additive,
    /// Apply desired tags, then remove extra tags from managed resources
    Reconcile,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Additive => write!(f, "additive"),
            SyncMode::Reconcile => write!(f, "reconcile"),
        }
    }
}

impl std::str::FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "additive" => Ok(SyncMode::Additive),
            "reconcile" => Ok(SyncMode::Reconcile),
            other => Err(format!(
                "sync mode must be 'additive' or 'reconcile', got: {other}"
            )),
        }
    }
}

/// Tags that should be present on a managed resource.
///
/// Always contains the management marker key. The value for that key is
/// whatever the caller supplied, or the marker's value if absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredTags {
    tags: HashMap<String, String>,
    marker_key: String,
}

impl DesiredTags {
    /// Build a desired tag set with the default management marker.
    pub fn new(tags: HashMap<String, String>) -> Self {
        Self::with_marker(tags, &ManagementMarker::default())
    }

    /// Build a desired tag set, injecting `marker` if its key is absent.
    pub fn with_marker(mut tags: HashMap<String, String>, marker: &ManagementMarker) -> Self {
        tags.entry(marker.key.clone())
            .or_insert_with(|| marker.value.clone());
        Self {
            tags,
            marker_key: marker.key.clone(),
        }
    }

    /// Key of the management marker tag
    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    /// Value applied for the management marker tag
    pub fn marker_value(&self) -> &str {
        self.tags
            .get(&self.marker_key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.tags
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.tags
    }
}

/// Keys present in `current` but absent from `desired`.
///
/// Order follows iteration over `current` and is unspecified.
pub fn tag_keys_to_remove(
    desired: &HashMap<String, String>,
    current: &HashMap<String, String>,
) -> Vec<String> {
    current
        .keys()
        .filter(|k| !desired.contains_key(*k))
        .cloned()
        .collect()
}

/// Whether a tag key is owned by AWS and cannot be removed by callers
pub fn is_reserved_tag_key(key: &str) -> bool {
    key.starts_with(RESERVED_TAG_PREFIX)
}
