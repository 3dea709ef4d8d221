use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::http::{
    messages::handlers::{edit_message, get_messages, send_message, stream_messages},
    server::{AppState, SyncService},
};

pub fn message_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/channels/{id}/messages",
            post(send_message::<S>).get(get_messages::<S>),
        )
        .route("/channels/{id}/messages/stream", get(stream_messages::<S>))
        .route(
            "/channels/{id}/messages/{message_id}",
            patch(edit_message::<S>),
        )
}
