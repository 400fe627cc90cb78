use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use sticky_types::api::ActivityEvent;

use crate::cache::StickyCache;
use crate::reconciler::Reconciler;

/// Why an activity signal did not start a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    BotAuthor,
    NoSticky,
    OwnPost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityDisposition {
    Scheduled,
    Ignored(Ignored),
}

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Coalesces bursts of channel activity into one reconciliation per quiet period.
///
/// Every accepted signal replaces the channel's pending timer, so the pass runs
/// `quiet_interval` after the *last* message of a burst.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    reconciler: Reconciler,
    cache: StickyCache,
    quiet_interval: Duration,
    timers: Mutex<HashMap<String, PendingTimer>>,
    next_generation: AtomicU64,
}

impl Scheduler {
    pub fn new(reconciler: Reconciler, cache: StickyCache, quiet_interval: Duration) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                reconciler,
                cache,
                quiet_interval,
                timers: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    pub async fn on_activity(&self, event: &ActivityEvent) -> ActivityDisposition {
        if event.author_is_bot {
            return ActivityDisposition::Ignored(Ignored::BotAuthor);
        }

        let Some(record) = self.inner.cache.get(&event.channel_id).await else {
            return ActivityDisposition::Ignored(Ignored::NoSticky);
        };

        if event.message_id == record.last_message_id {
            return ActivityDisposition::Ignored(Ignored::OwnPost);
        }

        self.schedule(&event.channel_id);
        ActivityDisposition::Scheduled
    }

    /// (Re)start the channel's quiet-period timer.
    pub fn schedule(&self, channel_id: &str) {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        // Spawn under the lock so the new task cannot look for its entry before it exists.
        let mut timers = self.timers();
        let handle = tokio::spawn(fire_after_quiet(
            self.inner.clone(),
            channel_id.to_string(),
            generation,
        ));

        if let Some(previous) = timers.insert(channel_id.to_string(), PendingTimer { generation, handle }) {
            previous.handle.abort();
            trace!("Debounce reset for channel {}", channel_id);
        }
    }

    /// Drop a channel's pending timer, if any.
    pub fn cancel(&self, channel_id: &str) -> bool {
        match self.timers().remove(channel_id) {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, channel_id: &str) -> bool {
        self.timers().contains_key(channel_id)
    }

    pub fn pending_count(&self) -> usize {
        self.timers().len()
    }

    /// Abort every pending timer. Used on shutdown.
    pub fn shutdown(&self) {
        let mut timers = self.timers();
        let count = timers.len();
        for (_, timer) in timers.drain() {
            timer.handle.abort();
        }
        if count > 0 {
            debug!("Dropped {} pending sticky timers", count);
        }
    }

    fn timers(&self) -> std::sync::MutexGuard<'_, HashMap<String, PendingTimer>> {
        self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn fire_after_quiet(inner: Arc<SchedulerInner>, channel_id: String, generation: u64) {
    tokio::time::sleep(inner.quiet_interval).await;

    // Claim the entry. Once removed, newer activity starts a fresh timer instead
    // of aborting this one, so a pass is never cut off half-way.
    let fired = {
        let mut timers = inner.timers.lock().unwrap_or_else(PoisonError::into_inner);
        match timers.get(&channel_id) {
            Some(timer) if timer.generation == generation => {
                timers.remove(&channel_id);
                true
            }
            _ => false,
        }
    };

    if !fired {
        return;
    }

    let outcome = inner.reconciler.reconcile(&channel_id).await;
    debug!("Reconciled channel {}: {:?}", channel_id, outcome);
}
