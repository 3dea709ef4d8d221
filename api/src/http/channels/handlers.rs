use axum::extract::{Path, State};
use groupsync_core::domain::channel::{
    entities::{Channel, ChannelId},
    ports::ChannelService,
};

use crate::http::server::{
    ApiError, AppState, Response, SyncService, middleware::auth::AuthSession,
};

#[tracing::instrument(skip(state, _session))]
pub async fn get_channel<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Response<Channel>, ApiError> {
    let channel = state.service.get_channel(&ChannelId::from(id)).await?;
    Ok(Response::ok(channel))
}
