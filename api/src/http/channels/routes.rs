use axum::{Router, routing::get};

use crate::http::{
    channels::handlers::get_channel,
    server::{AppState, SyncService},
};

pub fn channel_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new().route("/channels/{id}", get(get_channel::<S>))
}
