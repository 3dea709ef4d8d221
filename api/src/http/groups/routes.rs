use axum::{
    Router,
    routing::{get, post},
};

use crate::http::{
    groups::handlers::{
        create_channel, create_group, get_group, join_group, list_channels, list_groups,
    },
    server::{AppState, SyncService},
};

pub fn group_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new()
        .route("/groups", post(create_group::<S>).get(list_groups::<S>))
        .route("/groups/{id}", get(get_group::<S>))
        .route("/groups/{id}/join", post(join_group::<S>))
        .route(
            "/groups/{id}/channels",
            post(create_channel::<S>).get(list_channels::<S>),
        )
}
