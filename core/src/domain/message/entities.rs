use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::string_id;
use crate::domain::user::entities::UserId;

string_id!(MessageId);

impl MessageId {
    /// Builds an ID from the send time and the first eight characters of the
    /// sender's ID. Two sends by one user in the same millisecond collide;
    /// see [`MessageId::disambiguate`].
    pub fn synthesize(sent_at: DateTime<Utc>, sender_id: &UserId) -> Self {
        let fragment: String = sender_id.as_str().chars().take(8).collect();
        MessageId(format!(
            "message_{}_{}",
            sent_at.timestamp_millis(),
            fragment
        ))
    }

    /// Derives a fresh ID from a synthesized one that is already taken. The
    /// result sorts after the base ID.
    pub fn disambiguate(&self) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        MessageId(format!("{}_{}", self.0, &suffix[..6]))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    pub image_url: Option<String>,
    /// Sender name at send time; does not follow later profile edits.
    pub sender_username: String,
    /// Sender avatar at send time.
    pub sender_profile_url: String,
    pub sent_at: DateTime<Utc>,
    pub edited: bool,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// What a client hands to `send_message`. Everything else is filled in from
/// the sender's profile and the clock.
#[derive(Debug, Clone, Default)]
pub struct NewMessage {
    pub id: Option<MessageId>,
    pub text: String,
    pub image: Option<ImageUpload>,
}

impl NewMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            image: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct SendMessageRequest {
    pub id: Option<MessageId>,
    pub text: String,
}

impl SendMessageRequest {
    pub fn into_new_message(self) -> NewMessage {
        NewMessage {
            id: self.id,
            text: self.text,
            image: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct EditMessageRequest {
    pub text: String,
}

/// Orders messages by send time, then by ID so ties come out the same on
/// every store.
pub fn sort_by_sent_at(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then_with(|| a.id.cmp(&b.id)));
}
