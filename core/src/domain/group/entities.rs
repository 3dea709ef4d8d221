use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::channel::entities::{ChannelId, ChannelKind};
use crate::domain::common::{append_unique, string_id};
use crate::domain::user::entities::UserId;

pub const DEFAULT_GROUP_ICON: &str = "https://via.placeholder.com/150";

string_id!(GroupId);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub icon_url: String,
    /// Disambiguates groups sharing a display name, e.g. `0002`.
    pub tag: String,
    pub channels: Vec<ChannelId>,
    pub text_channels: Vec<ChannelId>,
    pub voice_channels: Vec<ChannelId>,
    pub members: Vec<UserId>,
    pub owner_id: UserId,
}

impl Group {
    /// A new group whose owner is its only member.
    pub fn new(id: GroupId, owner_id: UserId, name: String, tag: String) -> Self {
        Self {
            id,
            name,
            icon_url: DEFAULT_GROUP_ICON.to_string(),
            tag,
            channels: Vec::new(),
            text_channels: Vec::new(),
            voice_channels: Vec::new(),
            members: vec![owner_id.clone()],
            owner_id,
        }
    }

    /// Records `channel_id` in the full list and in the list matching `kind`.
    /// Returns `false` when the channel was already present.
    pub fn add_channel(&mut self, channel_id: &ChannelId, kind: ChannelKind) -> bool {
        let added = append_unique(&mut self.channels, channel_id);
        let kind_list = match kind {
            ChannelKind::Text => &mut self.text_channels,
            ChannelKind::Voice => &mut self.voice_channels,
        };
        append_unique(kind_list, channel_id) || added
    }

    pub fn add_member(&mut self, user_id: &UserId) -> bool {
        append_unique(&mut self.members, user_id)
    }

    pub fn kind_of(&self, channel_id: &ChannelId) -> Option<ChannelKind> {
        if self.text_channels.contains(channel_id) {
            Some(ChannelKind::Text)
        } else if self.voice_channels.contains(channel_id) {
            Some(ChannelKind::Voice)
        } else {
            None
        }
    }
}

pub fn format_tag(sequence: u64) -> String {
    format!("{sequence:04}")
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
}
