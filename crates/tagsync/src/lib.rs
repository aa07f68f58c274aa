//! tagsync - keep management tags applied to AWS resources
//!
//! This crate applies a desired tag set, always including a management
//! marker tag, to resources identified by ARN using the Resource Groups
//! Tagging API.

pub mod aws;
pub mod config;
pub mod tagger;

pub use tagger::{ResourceGroupsTagger, Tagger, sync_tags_with_context};
