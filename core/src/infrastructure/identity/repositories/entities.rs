use serde::{Deserialize, Serialize};

use crate::domain::{
    identity::entities::{Identity, Session},
    user::entities::UserId,
};

#[derive(Serialize, Debug)]
pub struct RegisterAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub display_name: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SignInAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token pair returned by the identity service after sign-in or refresh.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub user_id: String,
    pub token: String,
}

impl From<TokenResponse> for Session {
    fn from(value: TokenResponse) -> Self {
        Session {
            user_id: UserId::from(value.user_id),
            token: value.token,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct AccountResponse {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<AccountResponse> for Identity {
    fn from(value: AccountResponse) -> Self {
        Identity {
            user_id: UserId::from(value.user_id),
            email: value.email,
            display_name: value.display_name,
        }
    }
}
