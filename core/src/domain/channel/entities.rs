use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::{append_unique, string_id};
use crate::domain::group::entities::GroupId;
use crate::domain::message::entities::MessageId;

pub const DEFAULT_CHANNEL_NAME: &str = "general";

string_id!(ChannelId);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Text,
    Voice,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Text => write!(f, "text"),
            ChannelKind::Voice => write!(f, "voice"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    pub created_at: DateTime<Utc>,
    pub group_id: GroupId,
    /// Secondary index of message IDs. The message subcollection is
    /// authoritative; this list may trail it after a partial failure.
    pub message_ids: Vec<MessageId>,
}

impl Channel {
    pub fn new(id: ChannelId, group_id: GroupId, name: String, kind: ChannelKind) -> Self {
        Self {
            id,
            name,
            kind,
            created_at: Utc::now(),
            group_id,
            message_ids: Vec::new(),
        }
    }

    pub fn append_message(&mut self, message_id: &MessageId) -> bool {
        append_unique(&mut self.message_ids, message_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub kind: ChannelKind,
}
