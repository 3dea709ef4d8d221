use serde::{Deserialize, Serialize};

use crate::domain::{
    group::entities::GroupId,
    user::entities::{User, UserId},
};

/// Stored shape of a profile in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub profile_image_url: String,
    pub status: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[serde(default)]
    pub friends: Vec<UserId>,
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile_image_url: user.profile_image_url,
            status: user.status,
            age: user.age.map(i64::from),
            personality: user.personality,
            groups: user.groups,
            friends: user.friends,
        }
    }
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        Self {
            id: document.id,
            username: document.username,
            email: document.email,
            profile_image_url: document.profile_image_url,
            status: document.status,
            age: document.age.and_then(|age| u32::try_from(age).ok()),
            personality: document.personality,
            groups: document.groups,
            friends: document.friends,
        }
    }
}
