use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::string_id;
use crate::domain::group::entities::GroupId;

pub const DEFAULT_PROFILE_IMAGE: &str = "https://via.placeholder.com/150";
pub const DEFAULT_USERNAME: &str = "user";
pub const DEFAULT_STATUS: &str = "online";
pub const STATUS_OPTIONS: [&str; 4] = ["online", "away", "busy", "offline"];

string_id!(UserId);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub profile_image_url: String,
    pub status: String,
    pub age: Option<u32>,
    /// Free-form personality tag shown on the profile.
    pub personality: Option<String>,
    pub groups: Vec<GroupId>,
    pub friends: Vec<UserId>,
}

impl User {
    /// A freshly registered profile with default image and status.
    pub fn new(id: UserId, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
            profile_image_url: DEFAULT_PROFILE_IMAGE.to_string(),
            status: DEFAULT_STATUS.to_string(),
            age: None,
            personality: None,
            groups: Vec::new(),
            friends: Vec::new(),
        }
    }
}

pub fn is_known_status(status: &str) -> bool {
    STATUS_OPTIONS.contains(&status)
}

/// Field-level merge applied to a stored profile. `None` leaves a field as is.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub status: Option<String>,
    pub age: Option<u32>,
    pub personality: Option<String>,
}

impl UpdateUserInput {
    pub fn is_empty(&self) -> bool {
        self == &UpdateUserInput::default()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(profile_image_url) = self.profile_image_url {
            user.profile_image_url = profile_image_url;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(personality) = self.personality {
            user.personality = Some(personality);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub age: Option<u32>,
    pub personality: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_input(self) -> UpdateUserInput {
        UpdateUserInput {
            username: self.username,
            profile_image_url: self.profile_image_url,
            status: None,
            age: self.age,
            personality: self.personality,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}
