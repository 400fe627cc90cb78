use std::sync::Arc;

use tracing::{info, warn};

use sticky_types::StickyRecord;

use crate::cache::StickyCache;
use crate::error::StickyError;
use crate::locks::ChannelLocks;
use crate::platform::ChatPlatform;
use crate::store::StickyStore;

/// Administrator-only removal of a channel's sticky.
#[derive(Clone)]
pub struct Remover {
    platform: Arc<dyn ChatPlatform>,
    store: Arc<dyn StickyStore>,
    cache: StickyCache,
    locks: ChannelLocks,
}

impl Remover {
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

    /// Remove the sticky from `target_channel_id`, or from `current_channel_id`
    /// when no target is given. Returns the record that was removed.
    pub async fn remove(
        &self,
        current_channel_id: &str,
        target_channel_id: Option<&str>,
        caller_has_admin: bool,
    ) -> Result<StickyRecord, StickyError> {
        if !caller_has_admin {
            return Err(StickyError::PermissionDenied);
        }

        let channel_id = target_channel_id.unwrap_or(current_channel_id);
        let _guard = self.locks.acquire(channel_id).await;

        // Only approved stickies count; drafts live elsewhere.
        let record = self
            .cache
            .get(channel_id)
            .await
            .ok_or_else(|| StickyError::StickyNotFound(channel_id.to_string()))?;

        self.store.delete(channel_id).await.map_err(StickyError::Store)?;

        if let Err(e) = self
            .platform
            .delete_message(channel_id, &record.last_message_id)
            .await
        {
            warn!(
                "Could not delete sticky message {} in channel {}: {}",
                record.last_message_id, channel_id, e
            );
        }

        self.cache.delete(channel_id).await;

        info!("Removed sticky from channel {}", channel_id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlatform, FakeStore, text_record};

    async fn harness(records: Vec<StickyRecord>) -> (Arc<FakePlatform>, Arc<FakeStore>, StickyCache, Remover) {
        let platform = Arc::new(FakePlatform::new());
        let store = Arc::new(FakeStore::with_records(records));
        let cache = StickyCache::hydrate(store.as_ref()).await.unwrap();
        let remover = Remover::new(platform.clone(), store.clone(), cache.clone(), ChannelLocks::new());
        (platform, store, cache, remover)
    }

    #[tokio::test]
    async fn test_remove_current_channel() {
        let (platform, store, cache, remover) = harness(vec![text_record("c", "pinned", "s1")]).await;
        platform.post("c", "u1");
        platform.post("c", "s1");

        let removed = remover.remove("c", None, true).await.unwrap();
        assert_eq!(removed.last_message_id, "s1");
        assert!(cache.get("c").await.is_none());
        assert!(store.get("c").is_none());
        assert_eq!(platform.messages("c"), vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_explicit_target() {
        let (_platform, store, cache, remover) = harness(vec![text_record("target", "pinned", "s1")]).await;

        remover.remove("here", Some("target"), true).await.unwrap();
        assert!(cache.get("target").await.is_none());
        assert!(store.get("target").is_none());
    }

    #[tokio::test]
    async fn test_remove_without_sticky() {
        let (platform, store, _cache, remover) = harness(vec![]).await;
        platform.post("c", "u1");

        let err = remover.remove("c", None, true).await.unwrap_err();
        assert!(matches!(err, StickyError::StickyNotFound(_)));
        assert_eq!(FakePlatform::count(&store.writes), 0);
        assert_eq!(FakePlatform::count(&platform.deletes), 0);
        assert_eq!(platform.messages("c"), vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_remove_leaves_no_lock_behind() {
        let platform = Arc::new(FakePlatform::new());
        let store = Arc::new(FakeStore::new());
        let locks = ChannelLocks::new();
        let remover = Remover::new(platform, store, StickyCache::new(), locks.clone());

        for channel in ["a", "b", "c"] {
            assert!(remover.remove(channel, None, true).await.is_err());
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_remove_requires_admin() {
        let (platform, store, cache, remover) = harness(vec![text_record("c", "pinned", "s1")]).await;

        let err = remover.remove("c", None, false).await.unwrap_err();
        assert!(matches!(err, StickyError::PermissionDenied));
        assert!(cache.get("c").await.is_some());
        assert_eq!(FakePlatform::count(&store.writes), 0);
        assert_eq!(FakePlatform::count(&platform.deletes), 0);
    }

    #[tokio::test]
    async fn test_remove_without_admin_on_empty_channel_is_still_denied() {
        let (_platform, _store, _cache, remover) = harness(vec![]).await;

        let err = remover.remove("c", None, false).await.unwrap_err();
        assert!(matches!(err, StickyError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_failed_message_delete_still_removes() {
        let (platform, store, cache, remover) = harness(vec![text_record("c", "pinned", "s1")]).await;
        platform.make_unavailable("c");

        remover.remove("c", None, true).await.unwrap();
        assert!(cache.get("c").await.is_none());
        assert!(store.get("c").is_none());
    }
}
