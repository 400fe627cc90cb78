use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which rendering a sticky uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickyKind {
    Embed,
    Text,
}

impl StickyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embed => "embed",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for StickyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sticky kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for StickyKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "embed" => Ok(Self::Embed),
            "text" => Ok(Self::Text),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// What a sticky renders as. The kind and its fields travel together, so an
/// embed can never be missing its color and a text sticky never carries a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StickyContent {
    Embed {
        title: String,
        description: String,
        /// `#RGB` or `#RRGGBB`
        color: String,
    },
    Text {
        message: String,
    },
}

impl StickyContent {
    pub fn kind(&self) -> StickyKind {
        match self {
            Self::Embed { .. } => StickyKind::Embed,
            Self::Text { .. } => StickyKind::Text,
        }
    }
}

/// The durable sticky for a channel. One per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyRecord {
    pub channel_id: String,
    #[serde(flatten)]
    pub content: StickyContent,
    /// Most recent physical post of this sticky. May point at a message that
    /// has since been deleted on the platform.
    pub last_message_id: String,
    pub last_updated: DateTime<Utc>,
}

impl StickyRecord {
    pub fn kind(&self) -> StickyKind {
        self.content.kind()
    }

    /// Same sticky, now embodied by a freshly posted message.
    pub fn reposted(&self, message_id: String, at: DateTime<Utc>) -> Self {
        Self {
            channel_id: self.channel_id.clone(),
            content: self.content.clone(),
            last_message_id: message_id,
            last_updated: at,
        }
    }
}

/// An unapproved sticky being composed for a channel. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub channel_id: String,
    #[serde(flatten)]
    pub content: StickyContent,
    /// The preview message currently shown to the operator, edited in place on resubmission.
    pub preview_message_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}
