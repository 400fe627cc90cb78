use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use sticky_engine::i18n::Locale;
use sticky_engine::scheduler::ActivityDisposition;
use sticky_types::api::{ActivityEvent, ActivityResponse, GuildJoinEvent};

use crate::AppState;

/// A message was posted. Never fails; the engine decides whether to debounce.
pub async fn activity(State(state): State<AppState>, Json(event): Json<ActivityEvent>) -> impl IntoResponse {
    let disposition = state.engine.on_activity(&event).await;
    (
        StatusCode::ACCEPTED,
        Json(ActivityResponse {
            scheduled: disposition == ActivityDisposition::Scheduled,
        }),
    )
}

/// The bot joined a guild: greet whoever added it.
pub async fn guild_join(State(state): State<AppState>, Json(event): Json<GuildJoinEvent>) -> StatusCode {
    let locale = Locale::from_hint(event.locale.as_deref());
    if let Err(e) = state.engine.welcome(&event.owner_user_id, locale).await {
        warn!("Could not send welcome message to {}: {}", event.owner_user_id, e);
    }
    StatusCode::ACCEPTED
}
