use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use sticky_db::Database;
use sticky_db::models::StickyRow;
use sticky_types::{StickyContent, StickyKind, StickyRecord};

/// Durable home of sticky records, one row per channel.
#[async_trait]
pub trait StickyStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<StickyRecord>>;

    /// Fails if the channel already has a record.
    async fn create(&self, record: &StickyRecord) -> Result<()>;

    /// Create or overwrite the channel's record. All or nothing: on error the
    /// previous record is still in place.
    async fn replace(&self, record: &StickyRecord) -> Result<()>;

    async fn update_last_message(
        &self,
        channel_id: &str,
        last_message_id: &str,
        last_updated: DateTime<Utc>,
    ) -> Result<()>;

    /// No error when nothing exists for the channel.
    async fn delete(&self, channel_id: &str) -> Result<()>;
}

/// [`StickyStore`] over the SQLite database. Queries run on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Database>,
}

impl SqliteStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| anyhow!("spawn_blocking join error: {}", e))?
    }
}

#[async_trait]
impl StickyStore for SqliteStore {
    async fn find_all(&self) -> Result<Vec<StickyRecord>> {
        let rows = self.blocking(|db| db.list_stickies()).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let channel_id = row.channel_id.clone();
            match record_from_row(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping corrupt sticky row for channel {}: {}", channel_id, e),
            }
        }
        Ok(records)
    }

    async fn create(&self, record: &StickyRecord) -> Result<()> {
        let row = row_from_record(record);
        self.blocking(move |db| db.insert_sticky(&row)).await
    }

    async fn replace(&self, record: &StickyRecord) -> Result<()> {
        let row = row_from_record(record);
        self.blocking(move |db| db.replace_sticky(&row)).await
    }

    async fn update_last_message(
        &self,
        channel_id: &str,
        last_message_id: &str,
        last_updated: DateTime<Utc>,
    ) -> Result<()> {
        let cid = channel_id.to_string();
        let mid = last_message_id.to_string();
        let at = last_updated.to_rfc3339();
        let found = self
            .blocking(move |db| db.update_sticky_last_message(&cid, &mid, &at))
            .await?;
        if !found {
            bail!("no sticky row for channel {}", channel_id);
        }
        Ok(())
    }

    async fn delete(&self, channel_id: &str) -> Result<()> {
        let cid = channel_id.to_string();
        self.blocking(move |db| db.delete_sticky(&cid)).await?;
        Ok(())
    }
}

pub fn row_from_record(record: &StickyRecord) -> StickyRow {
    let (title, description, color, message) = match &record.content {
        StickyContent::Embed {
            title,
            description,
            color,
        } => (Some(title.clone()), Some(description.clone()), Some(color.clone()), None),
        StickyContent::Text { message } => (None, None, None, Some(message.clone())),
    };

    StickyRow {
        channel_id: record.channel_id.clone(),
        kind: record.kind().as_str().to_string(),
        title,
        description,
        color,
        message,
        last_message_id: record.last_message_id.clone(),
        last_updated: record.last_updated.to_rfc3339(),
    }
}

pub fn record_from_row(row: StickyRow) -> Result<StickyRecord> {
    let kind: StickyKind = row.kind.parse()?;
    let content = match kind {
        StickyKind::Embed => StickyContent::Embed {
            title: row.title.ok_or_else(|| anyhow!("embed without title"))?,
            description: row.description.ok_or_else(|| anyhow!("embed without description"))?,
            color: row.color.ok_or_else(|| anyhow!("embed without color"))?,
        },
        StickyKind::Text => StickyContent::Text {
            message: row.message.ok_or_else(|| anyhow!("text sticky without message"))?,
        },
    };

    Ok(StickyRecord {
        channel_id: row.channel_id,
        content,
        last_message_id: row.last_message_id,
        last_updated: parse_timestamp(&row.last_updated)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand through sqlite3 use datetime('now'): "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| anyhow!("bad timestamp '{}': {}", raw, e))
}
