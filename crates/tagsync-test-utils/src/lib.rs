//! Shared test utilities for tagsync
//!
//! This crate provides common test helpers that can be used across
//! multiple test modules without circular dependencies.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and unique resource name generation

pub mod aws;

// Re-export commonly used items
pub use aws::{get_test_region, s3_bucket_arn, test_bucket_name, test_run_id};
