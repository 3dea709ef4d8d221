use futures::{StreamExt, TryStreamExt, stream};
use mongodb::{
    Collection, Database,
    bson::doc,
    options::{FullDocumentType, ReturnDocument},
};

use crate::{
    domain::{
        channel::entities::ChannelId,
        common::CoreError,
        message::{
            entities::{Message, MessageId},
            ports::{MessageRepository, MessageSnapshots},
        },
    },
    infrastructure::{error::is_duplicate_key, message::repositories::entities::MessageDocument},
};

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<MessageDocument>,
}

impl MongoMessageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<MessageDocument>("channel_messages"),
        }
    }
}

async fn load_channel(
    collection: &Collection<MessageDocument>,
    channel_id: &ChannelId,
) -> Result<Vec<Message>, CoreError> {
    let documents: Vec<MessageDocument> = collection
        .find(doc! { "channel_id": channel_id.as_str() })
        // `_id` ends with the message ID, so ties order the same as in memory.
        .sort(doc! { "sent_at": 1, "_id": 1 })
        .await?
        .try_collect()
        .await?;

    Ok(documents.into_iter().map(Message::from).collect())
}

impl MessageRepository for MongoMessageRepository {
    async fn insert(&self, channel_id: &ChannelId, message: Message) -> Result<Message, CoreError> {
        let document = MessageDocument::from_message(channel_id, message.clone());

        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(message),
            Err(e) if is_duplicate_key(&e) => Err(CoreError::MessageAlreadyExists {
                channel_id: channel_id.clone(),
                id: message.id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        let key = MessageDocument::key(channel_id, id);
        let document = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(document.map(Message::from))
    }

    async fn list_by_channel(&self, channel_id: &ChannelId) -> Result<Vec<Message>, CoreError> {
        load_channel(&self.collection, channel_id).await
    }

    async fn update_text(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
        text: String,
    ) -> Result<Message, CoreError> {
        let key = MessageDocument::key(channel_id, id);
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": key },
                doc! { "$set": { "text": text, "edited": true } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        updated
            .map(Message::from)
            .ok_or_else(|| CoreError::MessageNotFound {
                channel_id: channel_id.clone(),
                id: id.clone(),
            })
    }

    async fn watch(&self, channel_id: &ChannelId) -> Result<MessageSnapshots, CoreError> {
        // Open the change stream before reading so no write is missed in between.
        let changes = self
            .collection
            .watch()
            .pipeline([doc! { "$match": { "fullDocument.channel_id": channel_id.as_str() } }])
            .full_document(FullDocumentType::UpdateLookup)
            .await?;

        let initial = load_channel(&self.collection, channel_id).await?;

        let collection = self.collection.clone();
        let watched = channel_id.clone();
        let updates = changes.then(move |event| {
            let collection = collection.clone();
            let watched = watched.clone();
            async move {
                event?;
                load_channel(&collection, &watched).await
            }
        });

        tracing::debug!(channel_id = %channel_id, "Change stream opened");
        Ok(stream::once(async move { Ok(initial) }).chain(updates).boxed())
    }
}
