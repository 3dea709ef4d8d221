use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::http::{
    auth::routes::auth_routes,
    channels::routes::channel_routes,
    groups::routes::group_routes,
    health::routes::health_routes,
    messages::routes::message_routes,
    server::{AppState, SyncService, openapi::openapi_json},
    users::routes::user_routes,
};

/// Assembles every route over `state`.
pub fn app_router<S: SyncService>(state: AppState<S>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(group_routes())
        .merge(channel_routes())
        .merge(message_routes())
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
