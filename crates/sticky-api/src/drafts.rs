use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use sticky_engine::i18n::{self, Locale};
use sticky_types::api::{ApproveRequest, ApprovedResponse, ComposeDraftRequest, FormQuery, FormResponse};

use crate::AppState;
use crate::error::ApiError;

pub async fn form(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Query(query): Query<FormQuery>,
) -> Json<FormResponse> {
    let locale = Locale::from_hint(query.locale.as_deref());
    let (content, from_draft) = state.engine.form_defaults(&channel_id, query.kind, locale).await;
    Json(FormResponse { content, from_draft })
}

/// Validate the form, refresh the preview, and keep it as the channel's draft.
pub async fn compose(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Json(req): Json<ComposeDraftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = Locale::from_hint(req.locale.as_deref());
    let draft = state
        .engine
        .compose(&channel_id, req.fields)
        .await
        .map_err(|e| ApiError::new(e, locale))?;
    Ok(Json(draft))
}

pub async fn approve(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Json(req): Json<ApproveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = Locale::from_hint(req.locale.as_deref());
    let sticky = state
        .engine
        .approve(&channel_id)
        .await
        .map_err(|e| ApiError::new(e, locale))?;

    Ok((
        StatusCode::CREATED,
        Json(ApprovedResponse {
            sticky,
            message: i18n::success(i18n::translate("success.sticky.sent", locale)),
        }),
    ))
}
