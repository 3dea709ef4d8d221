use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{
    channel::entities::{Channel, ChannelId, ChannelKind},
    common::{CoreError, lock},
    group::entities::{Group, GroupId},
    identity::entities::Session,
    user::entities::UserId,
};

pub trait GroupRepository: Send + Sync {
    /// Writes the fully formed group document.
    fn insert(&self, group: Group) -> impl Future<Output = Result<Group, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &GroupId,
    ) -> impl Future<Output = Result<Option<Group>, CoreError>> + Send;
    /// Atomically increments and returns the per-name tag counter. The first
    /// group with a given name gets `1`.
    fn next_tag(&self, name: &str) -> impl Future<Output = Result<u64, CoreError>> + Send;
    /// Set-union append of `channel_id` to the full channel list and to the
    /// list matching `kind`, in one atomic document update.
    fn add_channel(
        &self,
        id: &GroupId,
        channel_id: &ChannelId,
        kind: ChannelKind,
    ) -> impl Future<Output = Result<Group, CoreError>> + Send;
    /// Set-union append of `user_id` to the member list.
    fn add_member(
        &self,
        id: &GroupId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Group, CoreError>> + Send;
}

/// Group lifecycle and membership operations.
///
/// Membership lists only ever grow, and every append is idempotent: repeating
/// an operation after a failure never duplicates an entry.
pub trait GroupService: Send + Sync {
    /// Creates a group owned by the caller.
    ///
    /// The group starts with the owner as its sole member and one default
    /// text channel. The group ID is appended to the owner's profile last; a
    /// failure at that step is logged and the group is still returned.
    ///
    /// # Returns
    ///
    /// - `Ok(Group)` - The stored group
    /// - `Err(CoreError::InvalidGroupName)` - The name is blank
    /// - `Err(CoreError)` - Authentication failed or a store write failed
    fn create_group(
        &self,
        session: &Session,
        name: &str,
    ) -> impl Future<Output = Result<Group, CoreError>> + Send;

    /// Retrieves a group by ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Group)` - The group exists
    /// - `Err(CoreError::GroupNotFound)` - No group exists with the given ID
    fn get_group(&self, group_id: &GroupId)
    -> impl Future<Output = Result<Group, CoreError>> + Send;

    /// Adds the caller to the group's members and the group to the caller's
    /// profile.
    fn join_group(
        &self,
        session: &Session,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<Group, CoreError>> + Send;

    /// Resolves the group's channels in list order. Blank or dangling channel
    /// IDs are skipped; a blank group ID yields an empty list.
    fn list_channels(
        &self,
        group_id: &GroupId,
    ) -> impl Future<Output = Result<Vec<Channel>, CoreError>> + Send;
}

#[derive(Clone, Default)]
pub struct InMemoryGroupRepository {
    groups: Arc<Mutex<HashMap<GroupId, Group>>>,
    tags: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupRepository for InMemoryGroupRepository {
    async fn insert(&self, group: Group) -> Result<Group, CoreError> {
        lock(&self.groups)?.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, CoreError> {
        Ok(lock(&self.groups)?.get(id).cloned())
    }

    async fn next_tag(&self, name: &str) -> Result<u64, CoreError> {
        let mut tags = lock(&self.tags)?;
        let counter = tags.entry(name.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn add_channel(
        &self,
        id: &GroupId,
        channel_id: &ChannelId,
        kind: ChannelKind,
    ) -> Result<Group, CoreError> {
        let mut groups = lock(&self.groups)?;
        let group = groups
            .get_mut(id)
            .ok_or_else(|| CoreError::GroupNotFound { id: id.clone() })?;
        group.add_channel(channel_id, kind);
        Ok(group.clone())
    }

    async fn add_member(&self, id: &GroupId, user_id: &UserId) -> Result<Group, CoreError> {
        let mut groups = lock(&self.groups)?;
        let group = groups
            .get_mut(id)
            .ok_or_else(|| CoreError::GroupNotFound { id: id.clone() })?;
        group.add_member(user_id);
        Ok(group.clone())
    }
}
