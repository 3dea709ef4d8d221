use tracing::info;

use crate::domain::{
    channel::ports::ChannelRepository,
    common::{CoreError, services::Service},
    group::ports::GroupRepository,
    identity::{
        entities::{MIN_PASSWORD_LEN, RegisterRequest, Session},
        ports::{AuthService, IdentityRepository},
    },
    message::ports::MessageRepository,
    storage::ports::ObjectStorageRepository,
    user::{entities::User, ports::UserRepository},
};

fn validate_email(email: &str) -> Result<(), CoreError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::InvalidEmail),
    }
}

impl<G, C, M, U, I, O> AuthService for Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<(Session, User), CoreError> {
        let email = request.email.trim();
        validate_email(email)?;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let username = request.username.trim();
        if username.is_empty() {
            return Err(CoreError::InvalidUsername);
        }

        let session = self
            .identity_repository
            .register(email, &request.password, username)
            .await?;

        let user = User::new(session.user_id.clone(), username.to_string(), email.to_string());
        let user = self.user_repository.insert(user).await?;

        info!(user_id = %user.id, "User registered");
        Ok((session, user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let session = self.identity_repository.sign_in(email.trim(), password).await?;
        info!(user_id = %session.user_id, "User signed in");
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError> {
        self.identity_repository.sign_out(session).await?;
        info!(user_id = %session.user_id, "User signed out");
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> Result<Session, CoreError> {
        self.authenticate(session).await?;
        self.identity_repository.refresh_token(session).await
    }

    async fn resolve_session(&self, token: &str) -> Result<Session, CoreError> {
        let identity = self
            .identity_repository
            .current_identity(token)
            .await?
            .ok_or(CoreError::Unauthenticated)?;

        Ok(Session {
            user_id: identity.user_id,
            token: token.to_string(),
        })
    }
}
