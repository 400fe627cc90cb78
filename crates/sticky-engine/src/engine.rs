use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use sticky_types::api::{ActivityEvent, StickyFields};
use sticky_types::{Draft, StickyContent, StickyKind, StickyRecord};

use crate::cache::StickyCache;
use crate::compose::Composer;
use crate::drafts::{self, DraftStore};
use crate::error::StickyError;
use crate::i18n::Locale;
use crate::locks::ChannelLocks;
use crate::platform::ChatPlatform;
use crate::reconciler::{ReconcileOutcome, Reconciler};
use crate::removal::Remover;
use crate::scheduler::{ActivityDisposition, Scheduler};
use crate::store::StickyStore;
use crate::welcome;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Silence required after the last message before the sticky is moved.
    pub quiet_interval: Duration,
    /// Drafts untouched for this long are dropped.
    pub draft_ttl: Duration,
    pub draft_sweep_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quiet_interval: Duration::from_millis(3000),
            draft_ttl: Duration::from_secs(3600),
            draft_sweep_interval: Duration::from_secs(300),
        }
    }
}

/// Everything the ingress needs, wired together around one cache.
#[derive(Clone)]
pub struct StickyEngine {
    platform: Arc<dyn ChatPlatform>,
    cache: StickyCache,
    drafts: DraftStore,
    reconciler: Reconciler,
    scheduler: Scheduler,
    composer: Composer,
    remover: Remover,
    config: EngineConfig,
}

impl StickyEngine {
    /// Hydrate the cache from the store and build the engine around it.
    pub async fn start(
        platform: Arc<dyn ChatPlatform>,
        store: Arc<dyn StickyStore>,
        config: EngineConfig,
    ) -> anyhow::Result<Self> {
        let cache = StickyCache::hydrate(store.as_ref()).await?;
        Ok(Self::with_cache(platform, store, cache, config))
    }

    pub fn with_cache(
        platform: Arc<dyn ChatPlatform>,
        store: Arc<dyn StickyStore>,
        cache: StickyCache,
        config: EngineConfig,
    ) -> Self {
        let drafts = DraftStore::new();
        let locks = ChannelLocks::new();

        let reconciler = Reconciler::new(platform.clone(), store.clone(), cache.clone(), locks.clone());
        let scheduler = Scheduler::new(reconciler.clone(), cache.clone(), config.quiet_interval);
        let composer = Composer::new(
            platform.clone(),
            store.clone(),
            cache.clone(),
            drafts.clone(),
            locks.clone(),
        );
        let remover = Remover::new(platform.clone(), store, cache.clone(), locks);

        Self {
            platform,
            cache,
            drafts,
            reconciler,
            scheduler,
            composer,
            remover,
            config,
        }
    }

    pub async fn on_activity(&self, event: &ActivityEvent) -> ActivityDisposition {
        self.scheduler.on_activity(event).await
    }

    /// Run a pass right away, bypassing the debounce.
    pub async fn reconcile_now(&self, channel_id: &str) -> ReconcileOutcome {
        self.reconciler.reconcile(channel_id).await
    }

    pub async fn sticky(&self, channel_id: &str) -> Option<StickyRecord> {
        self.cache.get(channel_id).await
    }

    pub async fn sticky_count(&self) -> usize {
        self.cache.len().await
    }

    pub async fn form_defaults(&self, channel_id: &str, kind: StickyKind, locale: Locale) -> (StickyContent, bool) {
        self.composer.form_defaults(channel_id, kind, locale).await
    }

    pub async fn compose(&self, channel_id: &str, fields: StickyFields) -> Result<Draft, StickyError> {
        self.composer.compose(channel_id, fields).await
    }

    pub async fn approve(&self, channel_id: &str) -> Result<StickyRecord, StickyError> {
        self.composer.approve(channel_id).await
    }

    pub async fn remove(
        &self,
        current_channel_id: &str,
        target_channel_id: Option<&str>,
        caller_has_admin: bool,
    ) -> Result<StickyRecord, StickyError> {
        self.remover
            .remove(current_channel_id, target_channel_id, caller_has_admin)
            .await
    }

    /// DM the welcome embed to whoever added the bot.
    pub async fn welcome(&self, user_id: &str, locale: Locale) -> Result<(), StickyError> {
        self.platform
            .send_direct_message(user_id, &welcome::welcome_content(locale))
            .await?;
        info!("Sent welcome message to {}", user_id);
        Ok(())
    }

    pub fn spawn_draft_sweeper(&self) -> JoinHandle<()> {
        tokio::spawn(drafts::run_sweep_loop(
            self.drafts.clone(),
            self.config.draft_ttl,
            self.config.draft_sweep_interval,
        ))
    }

    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}
