use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use groupsync_core::domain::{
    channel::entities::ChannelId,
    message::{
        entities::{EditMessageRequest, Message, MessageId, SendMessageRequest},
        ports::MessageService,
    },
};

use crate::http::server::{
    ApiError, AppState, Response, SyncService, middleware::auth::AuthSession,
};

/// SSE event name carrying a full, ordered snapshot of the channel.
pub const SNAPSHOT_EVENT: &str = "messages";

#[tracing::instrument(skip(state, session, request))]
pub async fn send_message<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<SendMessageRequest>,
) -> Result<Response<Message>, ApiError> {
    let message = state
        .service
        .send_message(&session, &ChannelId::from(id), request.into_new_message())
        .await?;
    Ok(Response::created(message))
}

#[tracing::instrument(skip(state, _session))]
pub async fn get_messages<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Response<Vec<Message>>, ApiError> {
    let messages = state.service.get_messages(&ChannelId::from(id)).await?;
    Ok(Response::ok(messages))
}

#[tracing::instrument(skip(state, session, request))]
pub async fn edit_message<S: SyncService>(
    Path((id, message_id)): Path<(String, String)>,
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<EditMessageRequest>,
) -> Result<Response<Message>, ApiError> {
    let message = state
        .service
        .edit_message(
            &session,
            &ChannelId::from(id),
            &MessageId::from(message_id),
            &request.text,
        )
        .await?;
    Ok(Response::ok(message))
}

/// Streams a snapshot on connect and one per change until the client leaves.
/// Disconnecting drops the subscription, which cancels the listener.
#[tracing::instrument(skip(state, _session))]
pub async fn stream_messages<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let subscription = state
        .service
        .subscribe_to_messages(&ChannelId::from(id))
        .await?;

    let events = subscription
        .into_stream()
        .map(|messages| Event::default().event(SNAPSHOT_EVENT).json_data(messages));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
