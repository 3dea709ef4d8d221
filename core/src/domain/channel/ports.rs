use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{
    channel::entities::{Channel, ChannelId, ChannelKind},
    common::{CoreError, lock},
    group::entities::GroupId,
    identity::entities::Session,
    message::entities::MessageId,
};

pub trait ChannelRepository: Send + Sync {
    fn insert(&self, channel: Channel) -> impl Future<Output = Result<Channel, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &ChannelId,
    ) -> impl Future<Output = Result<Option<Channel>, CoreError>> + Send;
    /// Appends `message_id` to the channel's index inside one atomic
    /// single-document update. Returns `false` if it was already present.
    fn append_message(
        &self,
        id: &ChannelId,
        message_id: &MessageId,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

pub trait ChannelService: Send + Sync {
    /// Creates a channel and records it in its group.
    ///
    /// The channel document is written first; the group's lists are then
    /// extended with a set-union update, so concurrent creations on the same
    /// group do not overwrite each other.
    fn create_channel(
        &self,
        session: &Session,
        group_id: &GroupId,
        name: &str,
        kind: ChannelKind,
    ) -> impl Future<Output = Result<Channel, CoreError>> + Send;

    fn get_channel(
        &self,
        channel_id: &ChannelId,
    ) -> impl Future<Output = Result<Channel, CoreError>> + Send;
}

#[derive(Clone, Default)]
pub struct InMemoryChannelRepository {
    channels: Arc<Mutex<HashMap<ChannelId, Channel>>>,
}

impl InMemoryChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelRepository for InMemoryChannelRepository {
    async fn insert(&self, channel: Channel) -> Result<Channel, CoreError> {
        lock(&self.channels)?.insert(channel.id.clone(), channel.clone());
        Ok(channel)
    }

    async fn find_by_id(&self, id: &ChannelId) -> Result<Option<Channel>, CoreError> {
        Ok(lock(&self.channels)?.get(id).cloned())
    }

    async fn append_message(&self, id: &ChannelId, message_id: &MessageId) -> Result<bool, CoreError> {
        let mut channels = lock(&self.channels)?;
        let channel = channels
            .get_mut(id)
            .ok_or_else(|| CoreError::ChannelNotFound { id: id.clone() })?;
        Ok(channel.append_message(message_id))
    }
}
