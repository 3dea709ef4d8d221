use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{
    common::{CoreError, append_unique, lock},
    group::entities::{Group, GroupId},
    identity::entities::Session,
    user::entities::{UpdateUserInput, User, UserId},
};

pub trait UserRepository: Send + Sync {
    /// Writes the whole profile document, replacing any previous version.
    fn insert(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;
    /// Merges the non-`None` fields of `input` into the stored profile.
    fn update(
        &self,
        id: &UserId,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
    /// Set-union append of `group_id` to the user's group list.
    fn add_group(
        &self,
        id: &UserId,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
}

/// Profile operations for the signed-in user and lookups of other users.
pub trait UserService: Send + Sync {
    /// Loads the caller's profile, creating a default one from the identity
    /// when the profile document does not exist yet.
    fn current_user(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Returns `Err(CoreError::UserNotFound)` when no profile exists.
    fn get_user(&self, user_id: &UserId) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Applies a partial profile edit. A blank username is rejected.
    fn update_profile(
        &self,
        session: &Session,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Sets the caller's status to one of the allowed values.
    fn update_status(
        &self,
        session: &Session,
        status: &str,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// The groups in the caller's membership list. Missing group documents
    /// are skipped.
    fn list_groups(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Group>, CoreError>> + Send;
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    group_update_failure: Arc<Mutex<Option<CoreError>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `add_group` call fail with `error`.
    pub fn fail_group_updates(&self, error: CoreError) -> Result<(), CoreError> {
        *lock(&self.group_update_failure)? = Some(error);
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, CoreError> {
        lock(&self.users)?.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        Ok(lock(&self.users)?.get(id).cloned())
    }

    async fn update(&self, id: &UserId, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut users = lock(&self.users)?;
        let user = users
            .get_mut(id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })?;
        input.apply(user);
        Ok(user.clone())
    }

    async fn add_group(&self, id: &UserId, group_id: &GroupId) -> Result<User, CoreError> {
        if let Some(error) = lock(&self.group_update_failure)?.clone() {
            return Err(error);
        }

        let mut users = lock(&self.users)?;
        let user = users
            .get_mut(id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })?;
        append_unique(&mut user.groups, group_id);
        Ok(user.clone())
    }
}
