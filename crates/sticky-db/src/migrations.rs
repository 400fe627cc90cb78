use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (sticky_messages)");
        conn.execute_batch(
            "
            CREATE TABLE sticky_messages (
                channel_id      TEXT PRIMARY KEY,
                kind            TEXT NOT NULL CHECK (kind IN ('embed', 'text')),
                title           TEXT,
                description     TEXT,
                color           TEXT,
                message         TEXT,
                last_message_id TEXT NOT NULL,
                last_updated    TEXT NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);
            "
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
