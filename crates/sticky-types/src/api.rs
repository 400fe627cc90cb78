use serde::{Deserialize, Serialize};

use crate::models::{StickyContent, StickyKind, StickyRecord};

// -- Events --

/// A message was posted somewhere the bot can see.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityEvent {
    pub channel_id: String,
    pub message_id: String,
    #[serde(default)]
    pub author_is_bot: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub scheduled: bool,
}

/// The bot was added to a guild.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GuildJoinEvent {
    /// Whoever invited the bot, or the guild owner when the inviter is unknown.
    pub owner_user_id: String,
    pub locale: Option<String>,
}

// -- Composition --

/// Raw form input. Which fields matter depends on `kind`; validation happens in the engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StickyFields {
    pub kind: StickyKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ComposeDraftRequest {
    #[serde(flatten)]
    pub fields: StickyFields,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub kind: StickyKind,
    pub locale: Option<String>,
}

/// Values to pre-fill the compose form with.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormResponse {
    #[serde(flatten)]
    pub content: StickyContent,
    pub from_draft: bool,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApproveRequest {
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApprovedResponse {
    pub sticky: StickyRecord,
    pub message: String,
}

// -- Removal --

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveStickyRequest {
    /// Channel to clear; defaults to the channel the command was issued in.
    pub target_channel_id: Option<String>,
    #[serde(default)]
    pub caller_has_admin: bool,
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub channel_id: String,
    pub message: String,
}

// -- Misc --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub stickies: usize,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
