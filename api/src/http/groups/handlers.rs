use axum::{
    Json,
    extract::{Path, State},
};
use groupsync_core::domain::{
    channel::{
        entities::{Channel, CreateChannelRequest},
        ports::ChannelService,
    },
    group::{
        entities::{CreateGroupRequest, Group, GroupId},
        ports::GroupService,
    },
    user::ports::UserService,
};

use crate::http::server::{
    ApiError, AppState, Response, SyncService, middleware::auth::AuthSession,
};

#[tracing::instrument(skip(state, session), fields(name = %request.name))]
pub async fn create_group<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Response<Group>, ApiError> {
    let group = state.service.create_group(&session, &request.name).await?;
    Ok(Response::created(group))
}

/// Groups the caller belongs to.
#[tracing::instrument(skip_all)]
pub async fn list_groups<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
) -> Result<Response<Vec<Group>>, ApiError> {
    let groups = state.service.list_groups(&session).await?;
    Ok(Response::ok(groups))
}

#[tracing::instrument(skip(state, _session))]
pub async fn get_group<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Response<Group>, ApiError> {
    let group = state.service.get_group(&GroupId::from(id)).await?;
    Ok(Response::ok(group))
}

#[tracing::instrument(skip(state, session))]
pub async fn join_group<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
) -> Result<Response<Group>, ApiError> {
    let group = state.service.join_group(&session, &GroupId::from(id)).await?;
    Ok(Response::ok(group))
}

#[tracing::instrument(skip(state, session, request))]
pub async fn create_channel<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<CreateChannelRequest>,
) -> Result<Response<Channel>, ApiError> {
    let channel = state
        .service
        .create_channel(&session, &GroupId::from(id), &request.name, request.kind)
        .await?;
    Ok(Response::created(channel))
}

#[tracing::instrument(skip(state, _session))]
pub async fn list_channels<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Response<Vec<Channel>>, ApiError> {
    let channels = state.service.list_channels(&GroupId::from(id)).await?;
    Ok(Response::ok(channels))
}
