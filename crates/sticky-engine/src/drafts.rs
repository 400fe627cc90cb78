use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use sticky_types::Draft;

/// Unapproved drafts, one per channel. Process-local, never persisted, and
/// deliberately separate from [`crate::cache::StickyCache`].
#[derive(Clone, Default)]
pub struct DraftStore {
    inner: Arc<RwLock<HashMap<String, Draft>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, channel_id: &str) -> Option<Draft> {
        self.inner.read().await.get(channel_id).cloned()
    }

    /// Replace whatever draft the channel had.
    pub async fn set(&self, draft: Draft) {
        self.inner
            .write()
            .await
            .insert(draft.channel_id.clone(), draft);
    }

    pub async fn remove(&self, channel_id: &str) -> Option<Draft> {
        self.inner.write().await.remove(channel_id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drop drafts last edited more than `ttl` before `now`. Returns how many went.
    pub async fn sweep_expired(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> usize {
        let mut drafts = self.inner.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| now - d.updated_at <= ttl);
        before - drafts.len()
    }
}

/// Background task that drops abandoned drafts.
pub async fn run_sweep_loop(drafts: DraftStore, ttl: Duration, interval: Duration) {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;

        let count = drafts.sweep_expired(ttl, Utc::now()).await;
        if count > 0 {
            info!("Draft sweep: dropped {} abandoned drafts", count);
        }
    }
}
