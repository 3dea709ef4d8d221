use axum::{
    Json,
    extract::{Path, State},
};
use groupsync_core::domain::user::{
    entities::{UpdateProfileRequest, UpdateStatusRequest, User, UserId},
    ports::UserService,
};

use crate::http::server::{
    ApiError, AppState, Response, SyncService, middleware::auth::AuthSession,
};

#[tracing::instrument(skip_all)]
pub async fn current_user<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
) -> Result<Response<User>, ApiError> {
    let user = state.service.current_user(&session).await?;
    Ok(Response::ok(user))
}

#[tracing::instrument(skip_all)]
pub async fn update_profile<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Response<User>, ApiError> {
    let user = state
        .service
        .update_profile(&session, request.into_input())
        .await?;
    Ok(Response::ok(user))
}

#[tracing::instrument(skip(state, session), fields(status = %request.status))]
pub async fn update_status<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Response<User>, ApiError> {
    let user = state.service.update_status(&session, &request.status).await?;
    Ok(Response::ok(user))
}

#[tracing::instrument(skip(state, _session))]
pub async fn get_user<S: SyncService>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
    AuthSession(_session): AuthSession,
) -> Result<Response<User>, ApiError> {
    let user = state.service.get_user(&UserId::from(id)).await?;
    Ok(Response::ok(user))
}
