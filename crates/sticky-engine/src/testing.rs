//! In-memory collaborators for engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sticky_types::{StickyContent, StickyRecord};

use crate::platform::{ChatPlatform, PlatformError, PostedMessage};
use crate::store::StickyStore;

pub fn text_record(channel_id: &str, message: &str, last_message_id: &str) -> StickyRecord {
    StickyRecord {
        channel_id: channel_id.into(),
        content: StickyContent::Text {
            message: message.into(),
        },
        last_message_id: last_message_id.into(),
        last_updated: DateTime::default(),
    }
}

/// A chat platform where each channel is an ordered list of message ids.
#[derive(Default)]
pub struct FakePlatform {
    channels: Mutex<HashMap<String, Vec<String>>>,
    unavailable: Mutex<HashSet<String>>,
    next_id: AtomicU64,
    fail_deletes: AtomicBool,
    pub latest_calls: AtomicUsize,
    pub sends: AtomicUsize,
    pub edits: AtomicUsize,
    pub deletes: AtomicUsize,
    pub sent: Mutex<Vec<(String, StickyContent)>>,
    pub direct: Mutex<Vec<(String, StickyContent)>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Default::default()
        }
    }

    /// Someone else posts `message_id` in the channel.
    pub fn post(&self, channel_id: &str, message_id: &str) {
        self.channels
            .lock()
            .unwrap()
            .entry(channel_id.into())
            .or_default()
            .push(message_id.into());
    }

    /// Someone else deletes a message.
    pub fn remove(&self, channel_id: &str, message_id: &str) {
        if let Some(ids) = self.channels.lock().unwrap().get_mut(channel_id) {
            ids.retain(|id| id != message_id);
        }
    }

    pub fn messages(&self, channel_id: &str) -> Vec<String> {
        self.channels
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn make_unavailable(&self, channel_id: &str) {
        self.unavailable.lock().unwrap().insert(channel_id.into());
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self, channel_id: &str) -> Result<(), PlatformError> {
        if self.unavailable.lock().unwrap().contains(channel_id) {
            return Err(PlatformError::ChannelUnavailable(channel_id.into()));
        }
        Ok(())
    }

    fn contains(&self, channel_id: &str, message_id: &str) -> bool {
        self.channels
            .lock()
            .unwrap()
            .get(channel_id)
            .is_some_and(|ids| ids.iter().any(|id| id == message_id))
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn latest_message(&self, channel_id: &str) -> Result<Option<PostedMessage>, PlatformError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check(channel_id)?;
        Ok(self
            .channels
            .lock()
            .unwrap()
            .get(channel_id)
            .and_then(|ids| ids.last())
            .map(|id| PostedMessage { id: id.clone() }))
    }

    async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<PostedMessage>, PlatformError> {
        self.check(channel_id)?;
        Ok(self
            .contains(channel_id, message_id)
            .then(|| PostedMessage { id: message_id.into() }))
    }

    async fn send_message(&self, channel_id: &str, content: &StickyContent) -> Result<String, PlatformError> {
        self.check(channel_id)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.post(channel_id, &id);
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.into(), content.clone()));
        Ok(id)
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        _content: &StickyContent,
    ) -> Result<(), PlatformError> {
        self.check(channel_id)?;
        if !self.contains(channel_id, message_id) {
            return Err(PlatformError::MessageNotFound(message_id.into()));
        }
        self.edits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), PlatformError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(channel_id)?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(PlatformError::Transport("delete refused".into()));
        }
        if !self.contains(channel_id, message_id) {
            return Err(PlatformError::MessageNotFound(message_id.into()));
        }
        self.remove(channel_id, message_id);
        Ok(())
    }

    async fn send_direct_message(&self, user_id: &str, content: &StickyContent) -> Result<(), PlatformError> {
        self.direct
            .lock()
            .unwrap()
            .push((user_id.into(), content.clone()));
        Ok(())
    }
}

/// A store that keeps records in a map and counts every write.
#[derive(Default)]
pub struct FakeStore {
    records: Mutex<HashMap<String, StickyRecord>>,
    fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StickyRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().unwrap();
            for r in records {
                map.insert(r.channel_id.clone(), r);
            }
        }
        store
    }

    pub fn get(&self, channel_id: &str) -> Option<StickyRecord> {
        self.records.lock().unwrap().get(channel_id).cloned()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("store offline");
        }
        Ok(())
    }
}

#[async_trait]
impl StickyStore for FakeStore {
    async fn find_all(&self) -> Result<Vec<StickyRecord>> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, record: &StickyRecord) -> Result<()> {
        self.write()?;
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.channel_id) {
            bail!("duplicate channel {}", record.channel_id);
        }
        records.insert(record.channel_id.clone(), record.clone());
        Ok(())
    }

    async fn replace(&self, record: &StickyRecord) -> Result<()> {
        self.write()?;
        self.records
            .lock()
            .unwrap()
            .insert(record.channel_id.clone(), record.clone());
        Ok(())
    }

    async fn update_last_message(
        &self,
        channel_id: &str,
        last_message_id: &str,
        last_updated: DateTime<Utc>,
    ) -> Result<()> {
        self.write()?;
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(channel_id) else {
            bail!("no record for {}", channel_id);
        };
        record.last_message_id = last_message_id.into();
        record.last_updated = last_updated;
        Ok(())
    }

    async fn delete(&self, channel_id: &str) -> Result<()> {
        self.write()?;
        self.records.lock().unwrap().remove(channel_id);
        Ok(())
    }
}
