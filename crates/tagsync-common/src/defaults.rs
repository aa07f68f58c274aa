//! Default configuration values shared between the library and the CLI

pub use crate::tags::{MANAGED_BY_TAG_KEY, MANAGED_BY_TAG_VALUE};

/// Default AWS region when none is configured
pub const DEFAULT_REGION: &str = "us-east-2";

// Serde default functions for struct field defaults

/// Returns the default management marker key
pub fn default_marker_key() -> String {
    MANAGED_BY_TAG_KEY.to_string()
}

/// Returns the default management marker value
pub fn default_marker_value() -> String {
    MANAGED_BY_TAG_VALUE.to_string()
}
