use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::entities::UserId;

pub const MIN_PASSWORD_LEN: usize = 6;

/// An authenticated caller. Passed explicitly to every operation that
/// requires authentication.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Session {
    pub user_id: UserId,
    pub token: String,
}

/// What the identity service knows about the holder of a token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}
