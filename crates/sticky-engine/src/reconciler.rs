use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use sticky_types::StickyRecord;

use crate::cache::StickyCache;
use crate::locks::ChannelLocks;
use crate::platform::{ChatPlatform, PlatformError};
use crate::store::StickyStore;

/// What a reconciliation pass decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No sticky for the channel (removed while the timer was pending, or never set).
    NoSticky,
    /// The channel has no messages at all.
    EmptyChannel,
    /// The sticky is still the last message.
    AlreadyLast,
    /// The old post was gone; a new one was sent.
    Recreated { message_id: String },
    /// The old post was deleted and a new one was sent below the conversation.
    Relocated { message_id: String },
    /// The platform refused; nothing was changed.
    Aborted,
}

/// Keeps a channel's sticky as the channel's last message.
#[derive(Clone)]
pub struct Reconciler {
    platform: Arc<dyn ChatPlatform>,
    store: Arc<dyn StickyStore>,
    cache: StickyCache,
    locks: ChannelLocks,
}

impl Reconciler {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        store: Arc<dyn StickyStore>,
        cache: StickyCache,
        locks: ChannelLocks,
    ) -> Self {
        Self {
            platform,
            store,
            cache,
            locks,
        }
    }

    /// Run one pass for `channel_id`. Never fails: problems are logged and the
    /// next debounce cycle gets another try.
    pub async fn reconcile(&self, channel_id: &str) -> ReconcileOutcome {
        let _guard = self.locks.acquire(channel_id).await;

        let Some(record) = self.cache.get(channel_id).await else {
            debug!("No sticky for channel {}, nothing to reconcile", channel_id);
            return ReconcileOutcome::NoSticky;
        };

        match self.reconcile_record(&record).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Reconciliation aborted for channel {}: {}", channel_id, e);
                ReconcileOutcome::Aborted
            }
        }
    }

    async fn reconcile_record(&self, record: &StickyRecord) -> Result<ReconcileOutcome, PlatformError> {
        let channel_id = record.channel_id.as_str();

        let Some(latest) = self.platform.latest_message(channel_id).await? else {
            debug!("Channel {} is empty, skipping", channel_id);
            return Ok(ReconcileOutcome::EmptyChannel);
        };

        if latest.id == record.last_message_id {
            debug!("Sticky is already last in channel {}", channel_id);
            return Ok(ReconcileOutcome::AlreadyLast);
        }

        let existing = self
            .platform
            .fetch_message(channel_id, &record.last_message_id)
            .await?;

        let relocating = existing.is_some();
        if relocating {
            // Already-gone is fine; anything else is logged and ignored too.
            if let Err(e) = self
                .platform
                .delete_message(channel_id, &record.last_message_id)
                .await
            {
                debug!(
                    "Could not delete old sticky {} in channel {}: {}",
                    record.last_message_id, channel_id, e
                );
            }
        }

        let message_id = self.platform.send_message(channel_id, &record.content).await?;
        let updated = record.reposted(message_id.clone(), Utc::now());
        self.cache.set(updated.clone()).await;

        if let Err(e) = self
            .store
            .update_last_message(channel_id, &updated.last_message_id, updated.last_updated)
            .await
        {
            warn!("Error updating sticky message for channel {} in store: {}", channel_id, e);
        }

        if relocating {
            info!("Relocated sticky in channel {} to {}", channel_id, message_id);
            Ok(ReconcileOutcome::Relocated { message_id })
        } else {
            info!("Recreated deleted sticky in channel {} as {}", channel_id, message_id);
            Ok(ReconcileOutcome::Recreated { message_id })
        }
    }
}
