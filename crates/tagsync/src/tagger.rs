//! Tag synchronization onto AWS resources
//!
//! [`ResourceGroupsTagger`] applies a fixed [`DesiredTags`] set to a resource
//! through the Resource Groups Tagging API. In [`SyncMode::Additive`] (the
//! default) a sync is a single `TagResources` call and tags outside the
//! desired set are left alone. [`SyncMode::Reconcile`] additionally lists the
//! resource's current tags and removes the ones that are not desired.
//!
//! Remote errors are returned unchanged; there is no retry.

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::tagging::{ResourceGroupsTaggingClient, TagFilter, TaggingOperations};
use anyhow::Result;
use std::collections::HashMap;
use tagsync_common::tags::is_reserved_tag_key;
use tagsync_common::{DesiredTags, ResourceArn, SyncMode, tag_keys_to_remove};
use tracing::{debug, info, warn};

/// Something that can bring a resource's tags in line with a desired set
#[allow(async_fn_in_trait)]
pub trait Tagger {
    async fn sync_tags(&self, arn: &str) -> Result<()>;
}

/// Synchronizes desired tags through a [`TaggingOperations`] client.
///
/// The client is injected once and never rebound, so a tagger can be shared
/// across concurrent syncs.
pub struct ResourceGroupsTagger<C> {
    client: C,
    desired: DesiredTags,
    mode: SyncMode,
}

impl ResourceGroupsTagger<ResourceGroupsTaggingClient> {
    /// Create a tagger backed by a real tagging client.
    pub fn from_context(ctx: &AwsContext, desired: DesiredTags) -> Self {
        Self::new(ResourceGroupsTaggingClient::from_context(ctx), desired)
    }
}

impl<C: TaggingOperations> ResourceGroupsTagger<C> {
    /// Create an additive tagger.
    pub fn new(client: C, desired: DesiredTags) -> Self {
        Self {
            client,
            desired,
            mode: SyncMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn desired_tags(&self) -> &DesiredTags {
        &self.desired
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Apply the desired tags to `arn`, removing extras in reconcile mode.
    pub async fn sync_tags(&self, arn: &str) -> Result<()> {
        info!(
            arn = %arn,
            tag_count = self.desired.len(),
            mode = %self.mode,
            "Syncing resource tags"
        );

        match self.mode {
            SyncMode::Additive => self.tag_resource(arn).await?,
            SyncMode::Reconcile => {
                let arn = ResourceArn::parse(arn)?;
                self.tag_resource(arn.as_str()).await?;
                self.remove_undesired_tags(&arn).await?;
            }
        }

        info!(arn = %arn, "Resource tags synced");
        Ok(())
    }

    async fn tag_resource(&self, arn: &str) -> Result<()> {
        self.client
            .tag_resources(&[arn.to_string()], self.desired.as_map())
            .await
    }

    async fn remove_undesired_tags(&self, arn: &ResourceArn) -> Result<()> {
        let Some(current) = self.current_resource_tags(arn).await? else {
            warn!(
                arn = %arn,
                "Resource not found in tagged resource listing, removal skipped"
            );
            return Ok(());
        };

        let (reserved, removable): (Vec<String>, Vec<String>) =
            tag_keys_to_remove(self.desired.as_map(), &current)
                .into_iter()
                .partition(|k| is_reserved_tag_key(k));

        if !reserved.is_empty() {
            warn!(arn = %arn, keys = ?reserved, "Skipping removal of AWS-reserved tags");
        }

        if removable.is_empty() {
            debug!(arn = %arn, "No undesired tags to remove");
            return Ok(());
        }

        info!(arn = %arn, keys = ?removable, "Removing undesired tags");
        self.client
            .untag_resources(&[arn.to_string()], &removable)
            .await
    }

    /// Tags currently on `arn`, as seen by a marker-filtered listing of
    /// resources of the same service.
    ///
    /// `None` if the resource is not on the first page of the listing, e.g.
    /// because the marker was applied too recently to be indexed.
    async fn current_resource_tags(
        &self,
        arn: &ResourceArn,
    ) -> Result<Option<HashMap<String, String>>> {
        let filter = TagFilter::new(self.desired.marker_key(), self.desired.marker_value());
        let resources = self
            .client
            .get_resources(filter, vec![arn.service().to_string()])
            .await?;

        Ok(resources
            .into_iter()
            .find(|r| r.resource_arn == arn.as_str())
            .map(|r| r.tags))
    }
}

impl<C: TaggingOperations> Tagger for ResourceGroupsTagger<C> {
    async fn sync_tags(&self, arn: &str) -> Result<()> {
        ResourceGroupsTagger::sync_tags(self, arn).await
    }
}

/// Sync `desired` onto `arn` using a client bound to `ctx` for this call only.
pub async fn sync_tags_with_context(
    ctx: &AwsContext,
    desired: &DesiredTags,
    arn: &str,
) -> Result<()> {
    ResourceGroupsTagger::from_context(ctx, desired.clone())
        .sync_tags(arn)
        .await
}
