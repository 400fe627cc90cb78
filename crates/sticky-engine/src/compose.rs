use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use sticky_types::api::StickyFields;
use sticky_types::{Draft, StickyContent, StickyKind, StickyRecord};

use crate::cache::StickyCache;
use crate::drafts::DraftStore;
use crate::error::StickyError;
use crate::i18n::{self, Locale};
use crate::locks::ChannelLocks;
use crate::platform::{ChatPlatform, PlatformError};
use crate::store::StickyStore;
use crate::validation;

/// Draft → preview → approve. The only path that creates a sticky.
#[derive(Clone)]
pub struct Composer {
    platform: Arc<dyn ChatPlatform>,
    store: Arc<dyn StickyStore>,
    cache: StickyCache,
    drafts: DraftStore,
    locks: ChannelLocks,
}

impl Composer {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        store: Arc<dyn StickyStore>,
        cache: StickyCache,
        drafts: DraftStore,
        locks: ChannelLocks,
    ) -> Self {
        Self {
            platform,
            store,
            cache,
            drafts,
            locks,
        }
    }

    /// Values to pre-fill the compose form with: the channel's draft of the
    /// same kind if there is one, localized defaults otherwise.
    pub async fn form_defaults(&self, channel_id: &str, kind: StickyKind, locale: Locale) -> (StickyContent, bool) {
        if let Some(draft) = self.drafts.get(channel_id).await {
            if draft.content.kind() == kind {
                return (draft.content, true);
            }
        }

        let content = match kind {
            StickyKind::Embed => StickyContent::Embed {
                title: i18n::translate("default.sticky.title", locale).to_string(),
                description: i18n::translate("default.sticky.description", locale).to_string(),
                color: i18n::translate("default.sticky.color", locale).to_string(),
            },
            StickyKind::Text => StickyContent::Text {
                message: i18n::translate("default.sticky.message", locale).to_string(),
            },
        };
        (content, false)
    }

    /// Validate, show (or refresh) the preview, and store the draft.
    pub async fn compose(&self, channel_id: &str, fields: StickyFields) -> Result<Draft, StickyError> {
        let content = validation::validate(fields)?;
        let _guard = self.locks.acquire(channel_id).await;

        let previous_preview = self
            .drafts
            .get(channel_id)
            .await
            .and_then(|d| d.preview_message_id);

        let preview_message_id = match previous_preview {
            Some(preview_id) => match self.platform.edit_message(channel_id, &preview_id, &content).await {
                Ok(()) => preview_id,
                Err(PlatformError::MessageNotFound(_)) => {
                    debug!("Preview {} vanished in channel {}, posting a new one", preview_id, channel_id);
                    self.platform.send_message(channel_id, &content).await?
                }
                Err(e) => return Err(e.into()),
            },
            None => self.platform.send_message(channel_id, &content).await?,
        };

        let draft = Draft {
            channel_id: channel_id.to_string(),
            content,
            preview_message_id: Some(preview_message_id),
            updated_at: Utc::now(),
        };
        self.drafts.set(draft.clone()).await;

        Ok(draft)
    }

    /// Promote the channel's draft to its sticky and post it.
    pub async fn approve(&self, channel_id: &str) -> Result<StickyRecord, StickyError> {
        let _guard = self.locks.acquire(channel_id).await;

        let draft = self
            .drafts
            .get(channel_id)
            .await
            .ok_or_else(|| StickyError::DraftNotFound(channel_id.to_string()))?;

        let message_id = self.platform.send_message(channel_id, &draft.content).await?;
        let record = StickyRecord {
            channel_id: channel_id.to_string(),
            content: draft.content.clone(),
            last_message_id: message_id,
            last_updated: Utc::now(),
        };

        if let Err(e) = self.persist(&record).await {
            self.discard_message(channel_id, &record.last_message_id).await;
            return Err(e);
        }

        let previous = self.cache.get(channel_id).await;
        self.cache.set(record.clone()).await;
        self.drafts.remove(channel_id).await;

        if let Some(previous) = previous {
            self.discard_message(channel_id, &previous.last_message_id).await;
        }
        if let Some(preview_id) = &draft.preview_message_id {
            self.discard_message(channel_id, preview_id).await;
        }

        info!("Approved {} sticky for channel {}", record.kind(), channel_id);
        Ok(record)
    }

    async fn persist(&self, record: &StickyRecord) -> Result<(), StickyError> {
        self.store.replace(record).await.map_err(StickyError::Store)
    }

    async fn discard_message(&self, channel_id: &str, message_id: &str) {
        if let Err(e) = self.platform.delete_message(channel_id, message_id).await {
            warn!("Could not delete message {} in channel {}: {}", message_id, channel_id, e);
        }
    }
}
