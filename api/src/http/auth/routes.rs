use axum::{Router, routing::post};

use crate::http::{
    auth::handlers::{register, sign_in, sign_out},
    server::{AppState, SyncService},
};

pub fn auth_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new()
        .route("/auth/register", post(register::<S>))
        .route("/auth/sign-in", post(sign_in::<S>))
        .route("/auth/sign-out", post(sign_out::<S>))
}
