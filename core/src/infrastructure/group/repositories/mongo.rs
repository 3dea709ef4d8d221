use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, ReplaceOptions, ReturnDocument},
};

use crate::{
    domain::{
        channel::entities::{ChannelId, ChannelKind},
        common::CoreError,
        group::{
            entities::{Group, GroupId},
            ports::GroupRepository,
        },
        user::entities::UserId,
    },
    infrastructure::group::repositories::entities::GroupDocument,
};

#[derive(Clone)]
pub struct MongoGroupRepository {
    collection: Collection<GroupDocument>,
    tags: Collection<Document>,
}

impl MongoGroupRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<GroupDocument>("groups"),
            tags: db.collection::<Document>("group_tags"),
        }
    }

    fn return_after() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    async fn add_to_set(&self, id: &GroupId, additions: Document) -> Result<Group, CoreError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_str() }, doc! { "$addToSet": additions })
            .with_options(Self::return_after())
            .await?;

        updated
            .map(Group::from)
            .ok_or_else(|| CoreError::GroupNotFound { id: id.clone() })
    }
}

impl GroupRepository for MongoGroupRepository {
    async fn insert(&self, group: Group) -> Result<Group, CoreError> {
        let document = GroupDocument::from(group.clone());
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": group.id.as_str() }, &document)
            .with_options(options)
            .await?;

        tracing::debug!(group_id = %group.id, "Group document written");
        Ok(group)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, CoreError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_str() })
            .await?;
        Ok(document.map(Group::from))
    }

    async fn next_tag(&self, name: &str) -> Result<u64, CoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .tags
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "count": 1_i64 } })
            .with_options(options)
            .await?
            .ok_or_else(|| CoreError::DatabaseError {
                msg: format!("tag counter for '{name}' was not upserted"),
            })?;

        let count = counter
            .get_i64("count")
            .map_err(|e| CoreError::SerializationError { msg: e.to_string() })?;
        u64::try_from(count).map_err(|e| CoreError::SerializationError { msg: e.to_string() })
    }

    async fn add_channel(
        &self,
        id: &GroupId,
        channel_id: &ChannelId,
        kind: ChannelKind,
    ) -> Result<Group, CoreError> {
        let kind_field = match kind {
            ChannelKind::Text => "text_channels",
            ChannelKind::Voice => "voice_channels",
        };

        let mut additions = Document::new();
        additions.insert("channels", channel_id.as_str());
        additions.insert(kind_field, channel_id.as_str());

        self.add_to_set(id, additions).await
    }

    async fn add_member(&self, id: &GroupId, user_id: &UserId) -> Result<Group, CoreError> {
        self.add_to_set(id, doc! { "members": user_id.as_str() }).await
    }
}
