//! HTTP ingress: platform events and operator commands mapped onto the engine.

pub mod drafts;
pub mod error;
pub mod events;
pub mod middleware;
pub mod stickies;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use sticky_engine::StickyEngine;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub engine: StickyEngine,
    pub ingress_token: String,
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(stickies::health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/events/activity", post(events::activity))
        .route("/events/guild-join", post(events::guild_join))
        .route(
            "/channels/{channel_id}/sticky",
            get(stickies::get_sticky).delete(stickies::remove_sticky),
        )
        .route("/channels/{channel_id}/draft", put(drafts::compose))
        .route("/channels/{channel_id}/draft/form", get(drafts::form))
        .route("/channels/{channel_id}/draft/approve", post(drafts::approve))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_ingress_token,
        ))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
