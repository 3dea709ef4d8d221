use axum::{Json, extract::State};
use groupsync_core::domain::{
    identity::{
        entities::{RegisterRequest, Session, SignInRequest},
        ports::AuthService,
    },
    user::entities::User,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::http::server::{
    ApiError, AppState, Response, SyncService, middleware::auth::AuthSession,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub session: Session,
    pub user: User,
}

#[tracing::instrument(skip(state, request), fields(email = %request.email))]
pub async fn register<S: SyncService>(
    State(state): State<AppState<S>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response<RegisterResponse>, ApiError> {
    let (session, user) = state.service.register(request).await?;
    Ok(Response::created(RegisterResponse { session, user }))
}

#[tracing::instrument(skip(state, request), fields(email = %request.email))]
pub async fn sign_in<S: SyncService>(
    State(state): State<AppState<S>>,
    Json(request): Json<SignInRequest>,
) -> Result<Response<Session>, ApiError> {
    let session = state
        .service
        .sign_in(&request.email, &request.password)
        .await?;
    Ok(Response::ok(session))
}

#[tracing::instrument(skip_all)]
pub async fn sign_out<S: SyncService>(
    State(state): State<AppState<S>>,
    AuthSession(session): AuthSession,
) -> Result<Response<()>, ApiError> {
    state.service.sign_out(&session).await?;
    Ok(Response::no_content())
}
