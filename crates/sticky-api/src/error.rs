use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use sticky_engine::StickyError;
use sticky_engine::i18n::Locale;
use sticky_types::api::ErrorResponse;

/// A [`StickyError`] rendered for the operator in their locale.
#[derive(Debug)]
pub struct ApiError {
    pub error: StickyError,
    pub locale: Locale,
}

impl ApiError {
    pub fn new(error: StickyError, locale: Locale) -> Self {
        Self { error, locale }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            StickyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StickyError::DraftNotFound(_) | StickyError::StickyNotFound(_) => StatusCode::NOT_FOUND,
            StickyError::PermissionDenied => StatusCode::FORBIDDEN,
            StickyError::Platform(_) => StatusCode::BAD_GATEWAY,
            StickyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.error {
            StickyError::Store(e) => error!("Store failure: {:#}", e),
            StickyError::Platform(e) => warn!("Platform failure: {}", e),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.error.kind().to_string(),
            message: self.error.user_message(self.locale),
        };
        (status, Json(body)).into_response()
    }
}
