use serde::{Deserialize, Serialize};

use crate::domain::{
    channel::entities::ChannelId,
    group::entities::{Group, GroupId},
    user::entities::UserId,
};

/// Stored shape of a group in the `groups` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupDocument {
    #[serde(rename = "_id")]
    pub id: GroupId,
    pub name: String,
    pub icon_url: String,
    pub tag: String,
    #[serde(default)]
    pub channels: Vec<ChannelId>,
    #[serde(default)]
    pub text_channels: Vec<ChannelId>,
    #[serde(default)]
    pub voice_channels: Vec<ChannelId>,
    #[serde(default)]
    pub members: Vec<UserId>,
    pub owner_id: UserId,
}

impl From<Group> for GroupDocument {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            icon_url: group.icon_url,
            tag: group.tag,
            channels: group.channels,
            text_channels: group.text_channels,
            voice_channels: group.voice_channels,
            members: group.members,
            owner_id: group.owner_id,
        }
    }
}

impl From<GroupDocument> for Group {
    fn from(document: GroupDocument) -> Self {
        Self {
            id: document.id,
            name: document.name,
            icon_url: document.icon_url,
            tag: document.tag,
            channels: document.channels,
            text_channels: document.text_channels,
            voice_channels: document.voice_channels,
            members: document.members,
            owner_id: document.owner_id,
        }
    }
}
