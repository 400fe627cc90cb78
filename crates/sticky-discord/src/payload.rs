use serde::{Deserialize, Serialize};

use sticky_engine::PlatformError;
use sticky_types::StickyContent;

/// Discord JSON error codes we act on.
const UNKNOWN_CHANNEL: u64 = 10003;
const UNKNOWN_MESSAGE: u64 = 10008;
const MISSING_ACCESS: u64 = 50001;
const MISSING_PERMISSIONS: u64 = 50013;
const CANNOT_SEND_TO_USER: u64 = 50007;

#[derive(Debug, Serialize)]
pub struct MessagePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    pub embeds: Vec<EmbedPayload<'a>>,
    pub allowed_mentions: AllowedMentions,
}

#[derive(Debug, Serialize)]
pub struct EmbedPayload<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub color: u32,
}

/// Reposts must never ping anyone.
#[derive(Debug, Serialize)]
pub struct AllowedMentions {
    pub parse: [&'static str; 0],
}

impl<'a> MessagePayload<'a> {
    pub fn for_send(content: &'a StickyContent) -> Self {
        match content {
            StickyContent::Text { message } => Self::text(message),
            StickyContent::Embed { .. } => Self::embed(content, None),
        }
    }

    /// Edits must clear whatever the other kind left behind.
    pub fn for_edit(content: &'a StickyContent) -> Self {
        match content {
            StickyContent::Text { message } => Self::text(message),
            StickyContent::Embed { .. } => Self::embed(content, Some("")),
        }
    }

    fn text(message: &'a str) -> Self {
        Self {
            content: Some(message),
            embeds: Vec::new(),
            allowed_mentions: AllowedMentions { parse: [] },
        }
    }

    fn embed(content: &'a StickyContent, text: Option<&'a str>) -> Self {
        let embeds = match content {
            StickyContent::Embed {
                title,
                description,
                color,
            } => vec![EmbedPayload {
                title,
                description,
                color: color_value(color).unwrap_or(0),
            }],
            StickyContent::Text { .. } => Vec::new(),
        };
        Self {
            content: text,
            embeds,
            allowed_mentions: AllowedMentions { parse: [] },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateDmPayload<'a> {
    pub recipient_id: &'a str,
}

/// The parts of a Discord message / channel object we read.
#[derive(Debug, Deserialize)]
pub struct Snowflake {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u64,
    #[serde(default)]
    pub message: String,
}

/// `#RGB` / `#RRGGBB` → 0xRRGGBB.
pub fn color_value(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#')?;
    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return None,
    };
    u32::from_str_radix(&expanded, 16).ok()
}

/// Map a failed response onto the engine's error taxonomy.
pub fn classify_error(status: u16, body: &str, channel_id: &str, message_id: Option<&str>) -> PlatformError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

    match (status, parsed.code) {
        (_, UNKNOWN_MESSAGE) => PlatformError::MessageNotFound(message_id.unwrap_or_default().to_string()),
        (_, UNKNOWN_CHANNEL | MISSING_ACCESS | MISSING_PERMISSIONS | CANNOT_SEND_TO_USER) | (403, _) => {
            PlatformError::ChannelUnavailable(channel_id.to_string())
        }
        (404, _) => match message_id {
            Some(id) => PlatformError::MessageNotFound(id.to_string()),
            None => PlatformError::ChannelUnavailable(channel_id.to_string()),
        },
        _ => PlatformError::Transport(format!("HTTP {} (code {}): {}", status, parsed.code, parsed.message)),
    }
}
