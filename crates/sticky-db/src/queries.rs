use crate::models::StickyRow;
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

const STICKY_COLUMNS: &str =
    "channel_id, kind, title, description, color, message, last_message_id, last_updated";

impl Database {
    // -- Sticky messages --

    pub fn list_stickies(&self) -> Result<Vec<StickyRow>> {
        self.with_conn(query_stickies)
    }

    pub fn get_sticky(&self, channel_id: &str) -> Result<Option<StickyRow>> {
        self.with_conn(|conn| query_sticky(conn, channel_id))
    }

    /// Fails if the channel already has a row.
    pub fn insert_sticky(&self, row: &StickyRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sticky_messages
                    (channel_id, kind, title, description, color, message, last_message_id, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    row.channel_id,
                    row.kind,
                    row.title,
                    row.description,
                    row.color,
                    row.message,
                    row.last_message_id,
                    row.last_updated,
                ],
            )?;
            Ok(())
        })
    }

    /// Insert or overwrite the channel's row in a single statement.
    pub fn replace_sticky(&self, row: &StickyRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sticky_messages
                    (channel_id, kind, title, description, color, message, last_message_id, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(channel_id) DO UPDATE SET
                    kind = excluded.kind,
                    title = excluded.title,
                    description = excluded.description,
                    color = excluded.color,
                    message = excluded.message,
                    last_message_id = excluded.last_message_id,
                    last_updated = excluded.last_updated",
                rusqlite::params![
                    row.channel_id,
                    row.kind,
                    row.title,
                    row.description,
                    row.color,
                    row.message,
                    row.last_message_id,
                    row.last_updated,
                ],
            )?;
            Ok(())
        })
    }

    /// Returns false when no row exists for the channel.
    pub fn update_sticky_last_message(
        &self,
        channel_id: &str,
        last_message_id: &str,
        last_updated: &str,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE sticky_messages SET last_message_id = ?2, last_updated = ?3 WHERE channel_id = ?1",
                (channel_id, last_message_id, last_updated),
            )?;
            Ok(changed > 0)
        })
    }

    /// Returns false when there was nothing to delete.
    pub fn delete_sticky(&self, channel_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed =
                conn.execute("DELETE FROM sticky_messages WHERE channel_id = ?1", [channel_id])?;
            Ok(changed > 0)
        })
    }
}

fn map_sticky(row: &Row<'_>) -> rusqlite::Result<StickyRow> {
    Ok(StickyRow {
        channel_id: row.get(0)?,
        kind: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        color: row.get(4)?,
        message: row.get(5)?,
        last_message_id: row.get(6)?,
        last_updated: row.get(7)?,
    })
}

fn query_stickies(conn: &Connection) -> Result<Vec<StickyRow>> {
    let sql = format!("SELECT {} FROM sticky_messages ORDER BY channel_id", STICKY_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([], map_sticky)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_sticky(conn: &Connection, channel_id: &str) -> Result<Option<StickyRow>> {
    let sql = format!("SELECT {} FROM sticky_messages WHERE channel_id = ?1", STICKY_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt.query_row([channel_id], map_sticky).optional()?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_row(channel_id: &str) -> StickyRow {
        StickyRow {
            channel_id: channel_id.to_string(),
            kind: "embed".into(),
            title: Some("Rules".into()),
            description: Some("Be nice".into()),
            color: Some("#89CFF0".into()),
            message: None,
            last_message_id: "900".into(),
            last_updated: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_insert_and_list() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("2")).unwrap();
        db.insert_sticky(&StickyRow {
            channel_id: "1".into(),
            kind: "text".into(),
            title: None,
            description: None,
            color: None,
            message: Some("hello".into()),
            last_message_id: "800".into(),
            last_updated: "2026-01-01T00:00:00Z".into(),
        })
        .unwrap();

        let rows = db.list_stickies().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].channel_id, "1");
        assert_eq!(rows[0].message.as_deref(), Some("hello"));
        assert_eq!(rows[1], embed_row("2"));
    }

    #[test]
    fn test_channel_is_unique() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("1")).unwrap();
        assert!(db.insert_sticky(&embed_row("1")).is_err());
    }

    #[test]
    fn test_kind_is_constrained() {
        let db = Database::open_in_memory().unwrap();
        let mut row = embed_row("1");
        row.kind = "banner".into();
        assert!(db.insert_sticky(&row).is_err());
    }

    #[test]
    fn test_update_last_message() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("1")).unwrap();

        assert!(db.update_sticky_last_message("1", "901", "2026-01-02T00:00:00Z").unwrap());
        assert!(!db.update_sticky_last_message("missing", "1", "2026-01-02T00:00:00Z").unwrap());

        let row = db.get_sticky("1").unwrap().unwrap();
        assert_eq!(row.last_message_id, "901");
        assert_eq!(row.last_updated, "2026-01-02T00:00:00Z");
        assert_eq!(row.title.as_deref(), Some("Rules"));
    }

    #[test]
    fn test_replace_overwrites_every_column() {
        let db = Database::open_in_memory().unwrap();
        db.replace_sticky(&embed_row("1")).unwrap();
        assert_eq!(db.get_sticky("1").unwrap(), Some(embed_row("1")));

        let text = StickyRow {
            channel_id: "1".into(),
            kind: "text".into(),
            title: None,
            description: None,
            color: None,
            message: Some("hello".into()),
            last_message_id: "901".into(),
            last_updated: "2026-01-02T00:00:00Z".into(),
        };
        db.replace_sticky(&text).unwrap();
        assert_eq!(db.list_stickies().unwrap(), vec![text]);
    }

    #[test]
    fn test_failed_replace_keeps_old_row() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("1")).unwrap();

        let mut bad = embed_row("1");
        bad.kind = "banner".into();
        bad.last_message_id = "901".into();
        assert!(db.replace_sticky(&bad).is_err());
        assert_eq!(db.get_sticky("1").unwrap(), Some(embed_row("1")));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("1")).unwrap();

        assert!(db.delete_sticky("1").unwrap());
        assert!(!db.delete_sticky("1").unwrap());
        assert!(db.get_sticky("1").unwrap().is_none());
    }

    #[test]
    fn test_migrations_rerun_cleanly() {
        let db = Database::open_in_memory().unwrap();
        db.insert_sticky(&embed_row("1")).unwrap();
        db.with_conn(|conn| crate::migrations::run(conn)).unwrap();
        assert_eq!(db.list_stickies().unwrap().len(), 1);
    }
}
