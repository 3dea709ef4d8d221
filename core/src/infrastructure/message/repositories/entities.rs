use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    channel::entities::ChannelId,
    message::entities::{Message, MessageId},
    user::entities::UserId,
};

/// Stored shape of a message in the `channel_messages` collection.
///
/// Every channel's subcollection shares one Mongo collection; the document
/// key is `{channel_id}/{message_id}` so the same message ID may exist in two
/// channels.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageDocument {
    #[serde(rename = "_id")]
    pub key: String,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub sender_username: String,
    pub sender_profile_url: String,
    /// Milliseconds since the Unix epoch.
    pub sent_at: i64,
    #[serde(default)]
    pub edited: bool,
}

impl MessageDocument {
    pub fn key(channel_id: &ChannelId, message_id: &MessageId) -> String {
        format!("{channel_id}/{message_id}")
    }

    pub fn from_message(channel_id: &ChannelId, message: Message) -> Self {
        Self {
            key: Self::key(channel_id, &message.id),
            channel_id: channel_id.clone(),
            message_id: message.id,
            sender_id: message.sender_id,
            text: message.text,
            image_url: message.image_url,
            sender_username: message.sender_username,
            sender_profile_url: message.sender_profile_url,
            sent_at: message.sent_at.timestamp_millis(),
            edited: message.edited,
        }
    }
}

impl From<MessageDocument> for Message {
    fn from(document: MessageDocument) -> Self {
        Self {
            id: document.message_id,
            sender_id: document.sender_id,
            text: document.text,
            image_url: document.image_url,
            sender_username: document.sender_username,
            sender_profile_url: document.sender_profile_url,
            sent_at: DateTime::from_timestamp_millis(document.sent_at).unwrap_or_default(),
            edited: document.edited,
        }
    }
}
