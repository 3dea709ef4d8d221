use axum::{
    Router,
    routing::{get, put},
};

use crate::http::{
    server::{AppState, SyncService},
    users::handlers::{current_user, get_user, update_profile, update_status},
};

pub fn user_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new()
        .route("/users/me", get(current_user::<S>).patch(update_profile::<S>))
        .route("/users/me/status", put(update_status::<S>))
        .route("/users/{id}", get(get_user::<S>))
}
