use std::sync::LazyLock;

use regex::Regex;

use sticky_types::api::StickyFields;
use sticky_types::{StickyContent, StickyKind};

use crate::error::ValidationError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([A-Fa-f0-9]{3}|[A-Fa-f0-9]{6})$").expect("static regex"));

pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// Turn raw form input into content, enforcing the per-kind required fields.
pub fn validate(fields: StickyFields) -> Result<StickyContent, ValidationError> {
    match fields.kind {
        StickyKind::Embed => {
            let title = non_empty(fields.title);
            let description = non_empty(fields.description);
            let (Some(title), Some(description)) = (title, description) else {
                return Err(ValidationError::TitleDescriptionRequired);
            };

            let color = fields.color.unwrap_or_default();
            if !is_valid_hex_color(&color) {
                return Err(ValidationError::ColorInvalid);
            }

            Ok(StickyContent::Embed {
                title,
                description,
                color,
            })
        }
        StickyKind::Text => {
            let message = non_empty(fields.message).ok_or(ValidationError::MessageRequired)?;
            Ok(StickyContent::Text { message })
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
