use tracing::{error, info, warn};

use crate::domain::{
    channel::{
        entities::{Channel, ChannelId, ChannelKind, DEFAULT_CHANNEL_NAME},
        ports::ChannelRepository,
    },
    common::{CoreError, services::Service},
    group::{
        entities::{Group, GroupId, format_tag},
        ports::{GroupRepository, GroupService},
    },
    identity::{entities::Session, ports::IdentityRepository},
    message::ports::MessageRepository,
    storage::ports::ObjectStorageRepository,
    user::ports::UserRepository,
};

impl<G, C, M, U, I, O> GroupService for Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    async fn create_group(&self, session: &Session, name: &str) -> Result<Group, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidGroupName);
        }

        let identity = self.authenticate(session).await?;

        // Writes below must not race an expiring token.
        self.identity_repository
            .refresh_token(session)
            .await
            .map_err(|e| {
                warn!(user_id = %identity.user_id, error = %e, "Token refresh failed");
                CoreError::TokenRefreshFailed { msg: e.to_string() }
            })?;

        let owner_id = identity.user_id;
        let tag = format_tag(self.group_repository.next_tag(name).await?);
        let mut group = Group::new(GroupId::generate(), owner_id.clone(), name.to_string(), tag);

        let channel = Channel::new(
            ChannelId::generate(),
            group.id.clone(),
            DEFAULT_CHANNEL_NAME.to_string(),
            ChannelKind::Text,
        );
        group.add_channel(&channel.id, channel.kind);

        let group = self.group_repository.insert(group).await.inspect_err(|e| {
            error!(error = %e, kind = ?e.kind(), "Failed to store group");
        })?;
        self.channel_repository
            .insert(channel)
            .await
            .inspect_err(|e| {
                error!(group_id = %group.id, error = %e, kind = ?e.kind(), "Failed to store default channel");
            })?;

        // The group exists at this point; a stale profile is tolerated.
        if let Err(e) = self.user_repository.add_group(&owner_id, &group.id).await {
            warn!(
                group_id = %group.id,
                user_id = %owner_id,
                error = %e,
                "Group created but owner membership update failed"
            );
        }

        info!(group_id = %group.id, tag = %group.tag, "Group created");
        Ok(group)
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<Group, CoreError> {
        let group = self.group_repository.find_by_id(group_id).await?;

        match group {
            Some(group) => Ok(group),
            None => Err(CoreError::GroupNotFound {
                id: group_id.clone(),
            }),
        }
    }

    async fn join_group(&self, session: &Session, group_id: &GroupId) -> Result<Group, CoreError> {
        let identity = self.authenticate(session).await?;

        if group_id.is_blank() {
            return Err(CoreError::InvalidIdentifier { field: "group_id" });
        }

        let group = self
            .group_repository
            .add_member(group_id, &identity.user_id)
            .await?;
        self.user_repository
            .add_group(&identity.user_id, &group.id)
            .await?;

        info!(group_id = %group.id, user_id = %identity.user_id, "User joined group");
        Ok(group)
    }

    async fn list_channels(&self, group_id: &GroupId) -> Result<Vec<Channel>, CoreError> {
        if group_id.is_blank() {
            return Ok(Vec::new());
        }

        let group = self.get_group(group_id).await?;

        let mut channels = Vec::with_capacity(group.channels.len());
        for channel_id in group.channels.iter().filter(|id| !id.is_blank()) {
            match self.channel_repository.find_by_id(channel_id).await? {
                Some(channel) => channels.push(channel),
                None => warn!(
                    group_id = %group.id,
                    channel_id = %channel_id,
                    "Group references a missing channel"
                ),
            }
        }

        Ok(channels)
    }
}
