use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per channel.
///
/// Held across the whole read-modify-write of a channel's sticky so that a
/// reconciliation, an approval and a removal for the same channel never
/// interleave. Different channels never contend.
#[derive(Clone, Default)]
pub struct ChannelLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl ChannelLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the channel's lock. The entry is dropped from the map again
    /// once the guard goes and nobody else is waiting.
    pub async fn acquire(&self, channel_id: &str) -> ChannelGuard {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(channel_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        ChannelGuard {
            guard: Some(lock.lock_owned().await),
            locks: self.clone(),
            channel_id: channel_id.to_string(),
        }
    }

    fn release_idle(&self, channel_id: &str) {
        let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(channel_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(channel_id);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Held lock on one channel.
pub struct ChannelGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: ChannelLocks,
    channel_id: String,
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.release_idle(&self.channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_channel_is_exclusive() {
        let locks = ChannelLocks::new();
        let guard = locks.acquire("1").await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _g = contender.acquire("1").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let locks = ChannelLocks::new();
        let _a = locks.acquire("1").await;
        let _b = locks.acquire("2").await;
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_entry_released_with_guard() {
        let locks = ChannelLocks::new();
        let guard = locks.acquire("1").await;
        assert_eq!(locks.len(), 1);

        drop(guard);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_kept_while_contended() {
        let locks = ChannelLocks::new();
        let guard = locks.acquire("1").await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _g = contender.acquire("1").await;
            tokio::time::sleep(Duration::from_millis(20)).await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);

        waiting.await.unwrap();
        assert!(locks.is_empty());
    }
}
