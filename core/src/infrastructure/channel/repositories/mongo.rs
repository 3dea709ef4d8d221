use mongodb::{
    Collection, Database,
    bson::doc,
    options::ReplaceOptions,
};

use crate::{
    domain::{
        channel::{
            entities::{Channel, ChannelId},
            ports::ChannelRepository,
        },
        common::CoreError,
        message::entities::MessageId,
    },
    infrastructure::channel::repositories::entities::ChannelDocument,
};

#[derive(Clone)]
pub struct MongoChannelRepository {
    collection: Collection<ChannelDocument>,
}

impl MongoChannelRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ChannelDocument>("channels"),
        }
    }
}

impl ChannelRepository for MongoChannelRepository {
    async fn insert(&self, channel: Channel) -> Result<Channel, CoreError> {
        let document = ChannelDocument::from(channel.clone());
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": channel.id.as_str() }, &document)
            .with_options(options)
            .await?;

        tracing::debug!(channel_id = %channel.id, "Channel document written");
        Ok(channel)
    }

    async fn find_by_id(&self, id: &ChannelId) -> Result<Option<Channel>, CoreError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_str() })
            .await?;
        Ok(document.map(Channel::from))
    }

    async fn append_message(&self, id: &ChannelId, message_id: &MessageId) -> Result<bool, CoreError> {
        // Single-document update: the filter and the push apply atomically.
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.as_str(), "message_ids": { "$ne": message_id.as_str() } },
                doc! { "$push": { "message_ids": message_id.as_str() } },
            )
            .await?;

        if result.modified_count > 0 {
            return Ok(true);
        }

        match self.find_by_id(id).await? {
            Some(_) => Ok(false),
            None => Err(CoreError::ChannelNotFound { id: id.clone() }),
        }
    }
}
