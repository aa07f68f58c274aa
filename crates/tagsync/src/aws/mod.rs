//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - Resource Groups Tagging API: applying, removing and listing tags
//! - context: shared SDK configuration (region, profile, credentials)
//! - error: classification of tagging API errors

pub mod context;
pub mod error;
pub mod tagging;

pub use context::{AwsContext, FromAwsContext};
pub use tagging::{ResourceGroupsTaggingClient, ResourceTags, TagFilter, TaggingOperations};

// Error handling
pub use error::{TaggingError, classify_anyhow_error, classify_tagging_error};
