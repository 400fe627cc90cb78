use thiserror::Error;

use crate::i18n::{self, Locale};
use crate::platform::PlatformError;

/// Bad operator input. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title and description are required")]
    TitleDescriptionRequired,
    #[error("color is not a valid hex color")]
    ColorInvalid,
    #[error("message is required")]
    MessageRequired,
}

impl ValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::TitleDescriptionRequired => "error.validation.titleDescriptionRequired",
            Self::ColorInvalid => "error.validation.colorInvalid",
            Self::MessageRequired => "error.validation.messageRequired",
        }
    }
}

#[derive(Debug, Error)]
pub enum StickyError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("no draft for channel {0}")]
    DraftNotFound(String),

    #[error("no sticky for channel {0}")]
    StickyNotFound(String),

    #[error("administrator permission required")]
    PermissionDenied,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("store failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl StickyError {
    /// Stable machine-readable name, used as the `error` field on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DraftNotFound(_) | Self::StickyNotFound(_) => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::Platform(_) => "platform",
            Self::Store(_) => "store",
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Validation(v) => v.message_key(),
            Self::DraftNotFound(_) => "error.sticky.notFound",
            Self::StickyNotFound(_) => "error.sticky.remove.notFound",
            Self::PermissionDenied => "error.permissions.adminRequired",
            Self::Platform(PlatformError::ChannelUnavailable(_)) => "error.channel.notFound",
            Self::Platform(_) => "error.message.sendError",
            Self::Store(_) => "error.store.failed",
        }
    }

    /// Terse operator-facing text.
    pub fn user_message(&self, locale: Locale) -> String {
        i18n::failure(i18n::translate(self.message_key(), locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_localized() {
        let err = StickyError::PermissionDenied;
        assert_eq!(
            err.user_message(Locale::EnUs),
            "`❌`・You don't have permission to use this command."
        );
        assert_eq!(
            err.user_message(Locale::PtBr),
            "`❌`・Você não tem permissão para usar este comando."
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: StickyError = ValidationError::ColorInvalid.into();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.message_key(), "error.validation.colorInvalid");
    }
}
