use axum::Json;
use groupsync_core::domain::{
    channel::entities::{Channel, ChannelKind, CreateChannelRequest},
    group::entities::{CreateGroupRequest, Group},
    identity::entities::{RegisterRequest, Session, SignInRequest},
    message::entities::{EditMessageRequest, Message, SendMessageRequest},
    user::entities::{UpdateProfileRequest, UpdateStatusRequest, User},
};
use utoipa::OpenApi;

use crate::http::auth::handlers::RegisterResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "groupsync",
        description = "Groups, channels and live message feeds over a remote document store"
    ),
    components(schemas(
        Group,
        CreateGroupRequest,
        Channel,
        ChannelKind,
        CreateChannelRequest,
        Message,
        SendMessageRequest,
        EditMessageRequest,
        User,
        UpdateProfileRequest,
        UpdateStatusRequest,
        Session,
        RegisterRequest,
        RegisterResponse,
        SignInRequest,
    )),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "users", description = "Profiles"),
        (name = "groups", description = "Groups and their channels"),
        (name = "messages", description = "Channel messages and live feeds"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
