use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    channel::entities::{Channel, ChannelId, ChannelKind},
    group::entities::GroupId,
    message::entities::MessageId,
};

/// Stored shape of a channel in the `channels` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelDocument {
    #[serde(rename = "_id")]
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub group_id: GroupId,
    #[serde(default)]
    pub message_ids: Vec<MessageId>,
}

impl From<Channel> for ChannelDocument {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            kind: channel.kind,
            created_at: channel.created_at.timestamp_millis(),
            group_id: channel.group_id,
            message_ids: channel.message_ids,
        }
    }
}

impl From<ChannelDocument> for Channel {
    fn from(document: ChannelDocument) -> Self {
        Self {
            id: document.id,
            name: document.name,
            kind: document.kind,
            created_at: DateTime::from_timestamp_millis(document.created_at).unwrap_or_default(),
            group_id: document.group_id,
            message_ids: document.message_ids,
        }
    }
}
