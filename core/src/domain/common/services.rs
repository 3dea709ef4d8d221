use crate::domain::{
    channel::ports::ChannelRepository,
    common::CoreError,
    group::ports::GroupRepository,
    identity::{
        entities::{Identity, Session},
        ports::IdentityRepository,
    },
    message::ports::MessageRepository,
    storage::ports::ObjectStorageRepository,
    user::ports::UserRepository,
};

#[derive(Clone)]
pub struct Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    pub(crate) group_repository: G,
    pub(crate) channel_repository: C,
    pub(crate) message_repository: M,
    pub(crate) user_repository: U,
    pub(crate) identity_repository: I,
    pub(crate) storage_repository: O,
}

impl<G, C, M, U, I, O> Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    pub fn new(
        group_repository: G,
        channel_repository: C,
        message_repository: M,
        user_repository: U,
        identity_repository: I,
        storage_repository: O,
    ) -> Self {
        Self {
            group_repository,
            channel_repository,
            message_repository,
            user_repository,
            identity_repository,
            storage_repository,
        }
    }

    /// Resolves the identity behind `session`, rejecting unknown, expired or
    /// signed-out sessions and sessions whose token belongs to another user.
    pub(crate) async fn authenticate(&self, session: &Session) -> Result<Identity, CoreError> {
        let identity = self
            .identity_repository
            .current_identity(&session.token)
            .await?
            .ok_or(CoreError::Unauthenticated)?;

        if identity.user_id != session.user_id {
            tracing::warn!(
                user_id = %session.user_id,
                "Session token resolved to a different identity"
            );
            return Err(CoreError::Unauthenticated);
        }

        Ok(identity)
    }
}
