use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;

use sticky_types::StickyRecord;

use crate::store::StickyStore;

/// In-memory view of every approved sticky, keyed by channel id.
///
/// Has no persistence of its own: whoever mutates it keeps the store in step.
/// Cheap to clone; clones share the same map.
#[derive(Clone, Default)]
pub struct StickyCache {
    inner: Arc<RwLock<HashMap<String, StickyRecord>>>,
}

impl StickyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache from every record in the store.
    pub async fn hydrate(store: &dyn StickyStore) -> Result<Self> {
        let records = store.find_all().await?;
        let map: HashMap<String, StickyRecord> = records
            .into_iter()
            .map(|r| (r.channel_id.clone(), r))
            .collect();

        info!("Loaded {} sticky messages in cache", map.len());
        Ok(Self {
            inner: Arc::new(RwLock::new(map)),
        })
    }

    pub async fn get(&self, channel_id: &str) -> Option<StickyRecord> {
        self.inner.read().await.get(channel_id).cloned()
    }

    /// Upsert, keyed by `record.channel_id`.
    pub async fn set(&self, record: StickyRecord) {
        self.inner
            .write()
            .await
            .insert(record.channel_id.clone(), record);
    }

    /// Returns the removed record, if there was one.
    pub async fn delete(&self, channel_id: &str) -> Option<StickyRecord> {
        self.inner.write().await.remove(channel_id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
