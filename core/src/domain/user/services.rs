use tracing::{info, warn};

use crate::domain::{
    channel::ports::ChannelRepository,
    common::{CoreError, services::Service},
    group::{entities::Group, ports::GroupRepository},
    identity::{entities::Session, ports::IdentityRepository},
    message::ports::MessageRepository,
    storage::ports::ObjectStorageRepository,
    user::{
        entities::{DEFAULT_USERNAME, UpdateUserInput, User, UserId, is_known_status},
        ports::{UserRepository, UserService},
    },
};

impl<G, C, M, U, I, O> UserService for Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    async fn current_user(&self, session: &Session) -> Result<User, CoreError> {
        let identity = self.authenticate(session).await?;

        if let Some(user) = self.user_repository.find_by_id(&identity.user_id).await? {
            return Ok(user);
        }

        let username = identity
            .display_name
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let user = User::new(identity.user_id, username, identity.email);
        let user = self.user_repository.insert(user).await?;

        info!(user_id = %user.id, "Created missing profile from identity");
        Ok(user)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, CoreError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound {
                id: user_id.clone(),
            })
    }

    async fn update_profile(
        &self,
        session: &Session,
        input: UpdateUserInput,
    ) -> Result<User, CoreError> {
        let identity = self.authenticate(session).await?;

        if let Some(ref username) = input.username {
            if username.trim().is_empty() {
                return Err(CoreError::InvalidUsername);
            }
        }
        if let Some(ref status) = input.status {
            if !is_known_status(status) {
                return Err(CoreError::InvalidStatus {
                    status: status.clone(),
                });
            }
        }

        if input.is_empty() {
            return self.get_user(&identity.user_id).await;
        }

        self.user_repository.update(&identity.user_id, input).await
    }

    async fn update_status(&self, session: &Session, status: &str) -> Result<User, CoreError> {
        let input = UpdateUserInput {
            status: Some(status.to_string()),
            ..Default::default()
        };
        self.update_profile(session, input).await
    }

    async fn list_groups(&self, session: &Session) -> Result<Vec<Group>, CoreError> {
        let identity = self.authenticate(session).await?;

        let Some(user) = self.user_repository.find_by_id(&identity.user_id).await? else {
            return Ok(Vec::new());
        };

        let mut groups = Vec::with_capacity(user.groups.len());
        for group_id in &user.groups {
            match self.group_repository.find_by_id(group_id).await? {
                Some(group) => groups.push(group),
                None => warn!(user_id = %user.id, group_id = %group_id, "Profile references a missing group"),
            }
        }

        Ok(groups)
    }
}
