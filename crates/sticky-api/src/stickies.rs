use axum::{
    Json,
    extract::{Path, State},
};

use sticky_engine::StickyError;
use sticky_engine::i18n::{self, Locale};
use sticky_types::StickyRecord;
use sticky_types::api::{HealthResponse, RemoveStickyRequest, RemovedResponse};

use crate::AppState;
use crate::error::ApiError;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        stickies: state.engine.sticky_count().await,
    })
}

pub async fn get_sticky(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<Json<StickyRecord>, ApiError> {
    state
        .engine
        .sticky(&channel_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::new(StickyError::StickyNotFound(channel_id), Locale::default()))
}

/// `/stickyremove [channel]`. The path names the channel the command was issued in.
pub async fn remove_sticky(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Json(req): Json<RemoveStickyRequest>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let locale = Locale::from_hint(req.locale.as_deref());
    let removed = state
        .engine
        .remove(&channel_id, req.target_channel_id.as_deref(), req.caller_has_admin)
        .await
        .map_err(|e| ApiError::new(e, locale))?;

    let mention = format!("<#{}>", removed.channel_id);
    let text = i18n::format("success.sticky.removed", &[("channel", &mention)], locale);
    Ok(Json(RemovedResponse {
        channel_id: removed.channel_id,
        message: i18n::success(&text),
    }))
}
