//! Resource Groups Tagging API client
//!
//! Wraps the SDK client behind [`TaggingOperations`], the three calls the
//! synchronizer depends on, so sync logic can be tested without AWS.

use super::context::{AwsContext, FromAwsContext};
use super::error::check_failed_resources;
use anyhow::Result;
use aws_sdk_resourcegroupstagging::Client;
use aws_sdk_resourcegroupstagging::types::{Tag, TagFilter as SdkTagFilter};
use std::collections::HashMap;
use tracing::debug;

/// Tag filter for resource listings: match `key` with any of `values`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub values: Vec<String>,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: vec![value.into()],
        }
    }
}

/// A listed resource and all tags currently on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTags {
    pub resource_arn: String,
    pub tags: HashMap<String, String>,
}

/// Trait for tagging operations that can be mocked in tests.
///
/// Note: `get_resources` takes owned arguments to work around mockall
/// lifetime limitations.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait TaggingOperations: Send + Sync {
    /// Apply (upsert) `tags` on every resource in `resource_arns`
    async fn tag_resources(
        &self,
        resource_arns: &[String],
        tags: &HashMap<String, String>,
    ) -> Result<()>;

    /// Remove `tag_keys` from every resource in `resource_arns`
    async fn untag_resources(&self, resource_arns: &[String], tag_keys: &[String]) -> Result<()>;

    /// List resources matching a tag filter and resource type filters (first page only)
    async fn get_resources(
        &self,
        filter: TagFilter,
        resource_types: Vec<String>,
    ) -> Result<Vec<ResourceTags>>;
}

/// Resource Groups Tagging API client
pub struct ResourceGroupsTaggingClient {
    client: Client,
}

impl FromAwsContext for ResourceGroupsTaggingClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.tagging_client(),
        }
    }
}

impl ResourceGroupsTaggingClient {
    /// Wrap an existing SDK client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn tag_resources(
        &self,
        resource_arns: &[String],
        tags: &HashMap<String, String>,
    ) -> Result<()> {
        debug!(resources = ?resource_arns, tag_count = tags.len(), "Tagging resources");

        let output = self
            .client
            .tag_resources()
            .set_resource_arn_list(Some(resource_arns.to_vec()))
            .set_tags(Some(tags.clone()))
            .send()
            .await?;

        check_failed_resources(output.failed_resources_map())?;
        Ok(())
    }

    pub async fn untag_resources(
        &self,
        resource_arns: &[String],
        tag_keys: &[String],
    ) -> Result<()> {
        debug!(resources = ?resource_arns, tag_keys = ?tag_keys, "Untagging resources");

        let output = self
            .client
            .untag_resources()
            .set_resource_arn_list(Some(resource_arns.to_vec()))
            .set_tag_keys(tag_key_list(tag_keys))
            .send()
            .await?;

        check_failed_resources(output.failed_resources_map())?;
        Ok(())
    }

    pub async fn get_resources(
        &self,
        filter: TagFilter,
        resource_types: Vec<String>,
    ) -> Result<Vec<ResourceTags>> {
        let sdk_filter = SdkTagFilter::builder()
            .key(filter.key)
            .set_values(Some(filter.values))
            .build();

        let response = self
            .client
            .get_resources()
            .tag_filters(sdk_filter)
            .set_resource_type_filters(Some(resource_types))
            .send()
            .await?;

        if response.pagination_token().is_some_and(|t| !t.is_empty()) {
            debug!("More tagged resources available; only the first page is read");
        }

        let resources: Vec<ResourceTags> = response
            .resource_tag_mapping_list()
            .iter()
            .filter_map(|mapping| {
                mapping.resource_arn().map(|arn| ResourceTags {
                    resource_arn: arn.to_string(),
                    tags: extract_tags(mapping.tags()),
                })
            })
            .collect();

        debug!(count = resources.len(), "Found tagged resources");
        Ok(resources)
    }
}

impl TaggingOperations for ResourceGroupsTaggingClient {
    async fn tag_resources(
        &self,
        resource_arns: &[String],
        tags: &HashMap<String, String>,
    ) -> Result<()> {
        ResourceGroupsTaggingClient::tag_resources(self, resource_arns, tags).await
    }

    async fn untag_resources(&self, resource_arns: &[String], tag_keys: &[String]) -> Result<()> {
        ResourceGroupsTaggingClient::untag_resources(self, resource_arns, tag_keys).await
    }

    async fn get_resources(
        &self,
        filter: TagFilter,
        resource_types: Vec<String>,
    ) -> Result<Vec<ResourceTags>> {
        ResourceGroupsTaggingClient::get_resources(self, filter, resource_types).await
    }
}

/// Extract SDK tags into a HashMap.
pub fn extract_tags(tags: &[Tag]) -> HashMap<String, String> {
    tags.iter()
        .map(|t| (t.key().to_string(), t.value().to_string()))
        .collect()
}

/// Tag keys for an untag request; an empty list is sent as absent.
pub fn tag_key_list(keys: &[String]) -> Option<Vec<String>> {
    if keys.is_empty() {
        None
    } else {
        Some(keys.to_vec())
    }
}
