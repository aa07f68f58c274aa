//! tagsync-common - Shared types and utilities
//!
//! This crate provides the tag and resource identifier types used by the
//! tagging client, without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`arn`]: Resource ARN parsing and service segment extraction
//! - [`defaults`]: Default configuration values
//! - [`tags`]: Management marker, desired tag set and removal diffing

pub mod arn;
pub mod defaults;
pub mod tags;

// Re-export commonly used types
pub use arn::{ArnError, ResourceArn, service_from_arn};
pub use tags::{DesiredTags, ManagementMarker, SyncMode, tag_keys_to_remove};
