use tracing::info;

use crate::domain::{
    channel::{
        entities::{Channel, ChannelId, ChannelKind},
        ports::{ChannelRepository, ChannelService},
    },
    common::{CoreError, services::Service},
    group::{entities::GroupId, ports::GroupRepository},
    identity::{entities::Session, ports::IdentityRepository},
    message::ports::MessageRepository,
    storage::ports::ObjectStorageRepository,
    user::ports::UserRepository,
};

impl<G, C, M, U, I, O> ChannelService for Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    async fn create_channel(
        &self,
        session: &Session,
        group_id: &GroupId,
        name: &str,
        kind: ChannelKind,
    ) -> Result<Channel, CoreError> {
        self.authenticate(session).await?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidChannelName);
        }
        if group_id.is_blank() {
            return Err(CoreError::InvalidIdentifier { field: "group_id" });
        }

        if self.group_repository.find_by_id(group_id).await?.is_none() {
            return Err(CoreError::GroupNotFound {
                id: group_id.clone(),
            });
        }

        let channel = Channel::new(ChannelId::generate(), group_id.clone(), name.to_string(), kind);
        let channel = self.channel_repository.insert(channel).await?;

        self.group_repository
            .add_channel(group_id, &channel.id, channel.kind)
            .await?;

        info!(group_id = %group_id, channel_id = %channel.id, kind = %channel.kind, "Channel created");
        Ok(channel)
    }

    async fn get_channel(&self, channel_id: &ChannelId) -> Result<Channel, CoreError> {
        self.channel_repository
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| CoreError::ChannelNotFound {
                id: channel_id.clone(),
            })
    }
}
