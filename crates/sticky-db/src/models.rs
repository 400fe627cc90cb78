/// Database row types. These map directly to SQLite rows.
/// Distinct from sticky-types models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq)]
pub struct StickyRow {
    pub channel_id: String,
    /// 'embed' or 'text'
    pub kind: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub message: Option<String>,
    pub last_message_id: String,
    /// RFC 3339, UTC
    pub last_updated: String,
}
