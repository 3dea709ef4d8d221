use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::domain::{
    channel::entities::ChannelId,
    common::{CoreError, lock},
    identity::entities::Session,
    message::{
        entities::{Message, MessageId, NewMessage, sort_by_sent_at},
        subscription::MessageSubscription,
    },
};

/// Full snapshots of a channel's messages, one per change notification.
pub type MessageSnapshots = BoxStream<'static, Result<Vec<Message>, CoreError>>;

pub trait MessageRepository: Send + Sync {
    /// Writes `message` into the channel's message subcollection. Fails with
    /// `CoreError::MessageAlreadyExists` when the ID is taken; the stored
    /// message is left untouched.
    fn insert(
        &self,
        channel_id: &ChannelId,
        message: Message,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;

    fn find_by_id(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
    ) -> impl Future<Output = Result<Option<Message>, CoreError>> + Send;

    /// All messages of a channel, oldest first.
    fn list_by_channel(
        &self,
        channel_id: &ChannelId,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    /// Replaces the text of a message and marks it edited.
    fn update_text(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
        text: String,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;

    /// Starts listening for changes on the channel's messages. The stream
    /// yields the current snapshot first and then one snapshot per change.
    fn watch(
        &self,
        channel_id: &ChannelId,
    ) -> impl Future<Output = Result<MessageSnapshots, CoreError>> + Send;
}

pub trait MessageService: Send + Sync {
    /// Sends a message as the session's user.
    ///
    /// A missing ID is synthesized from the send time and the sender ID, with a
    /// random suffix when that ID is already taken. The message is written to
    /// the channel's subcollection and then appended to the channel's message
    /// index.
    ///
    /// Resending a client-supplied ID is idempotent: the stored message is
    /// returned unchanged and the index is repaired if needed. Reusing an ID
    /// that belongs to another sender fails with `CoreError::NotMessageSender`.
    fn send_message(
        &self,
        session: &Session,
        channel_id: &ChannelId,
        message: NewMessage,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;

    /// One-shot fetch ordered by send time. A blank channel ID or an empty
    /// channel yields an empty list.
    fn get_messages(
        &self,
        channel_id: &ChannelId,
    ) -> impl Future<Output = Result<Vec<Message>, CoreError>> + Send;

    /// Registers a live view of the channel's messages.
    fn subscribe_to_messages(
        &self,
        channel_id: &ChannelId,
    ) -> impl Future<Output = Result<MessageSubscription, CoreError>> + Send;

    /// Edits the text of a message. Only its sender may do so.
    fn edit_message(
        &self,
        session: &Session,
        channel_id: &ChannelId,
        message_id: &MessageId,
        text: &str,
    ) -> impl Future<Output = Result<Message, CoreError>> + Send;
}

#[derive(Clone, Debug)]
enum MessageChange {
    Updated(ChannelId),
    Failed(String),
}

type ChannelMessages = Arc<Mutex<HashMap<ChannelId, Vec<Message>>>>;

#[derive(Clone)]
pub struct InMemoryMessageRepository {
    messages: ChannelMessages,
    changes: broadcast::Sender<MessageChange>,
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            messages: Arc::new(Mutex::new(HashMap::new())),
            changes,
        }
    }

    /// Delivers a transport error to every open watch stream.
    pub fn fail_watchers(&self, reason: &str) {
        let _ = self.changes.send(MessageChange::Failed(reason.to_string()));
    }

    fn snapshot(messages: &ChannelMessages, channel_id: &ChannelId) -> Result<Vec<Message>, CoreError> {
        let mut snapshot = lock(messages)?.get(channel_id).cloned().unwrap_or_default();
        sort_by_sent_at(&mut snapshot);
        Ok(snapshot)
    }

    fn notify(&self, channel_id: &ChannelId) {
        // No receivers simply means nobody is watching.
        let _ = self.changes.send(MessageChange::Updated(channel_id.clone()));
    }
}

impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, channel_id: &ChannelId, message: Message) -> Result<Message, CoreError> {
        {
            let mut messages = lock(&self.messages)?;
            let channel = messages.entry(channel_id.clone()).or_default();
            if channel.iter().any(|m| m.id == message.id) {
                return Err(CoreError::MessageAlreadyExists {
                    channel_id: channel_id.clone(),
                    id: message.id,
                });
            }
            channel.push(message.clone());
        }
        self.notify(channel_id);
        Ok(message)
    }

    async fn find_by_id(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
    ) -> Result<Option<Message>, CoreError> {
        Ok(lock(&self.messages)?
            .get(channel_id)
            .and_then(|messages| messages.iter().find(|m| &m.id == id))
            .cloned())
    }

    async fn list_by_channel(&self, channel_id: &ChannelId) -> Result<Vec<Message>, CoreError> {
        Self::snapshot(&self.messages, channel_id)
    }

    async fn update_text(
        &self,
        channel_id: &ChannelId,
        id: &MessageId,
        text: String,
    ) -> Result<Message, CoreError> {
        let updated = {
            let mut messages = lock(&self.messages)?;
            let message = messages
                .get_mut(channel_id)
                .and_then(|messages| messages.iter_mut().find(|m| &m.id == id))
                .ok_or_else(|| CoreError::MessageNotFound {
                    channel_id: channel_id.clone(),
                    id: id.clone(),
                })?;
            message.text = text;
            message.edited = true;
            message.clone()
        };
        self.notify(channel_id);
        Ok(updated)
    }

    async fn watch(&self, channel_id: &ChannelId) -> Result<MessageSnapshots, CoreError> {
        // Subscribe before taking the first snapshot so no change slips between.
        let receiver = self.changes.subscribe();
        let initial = Self::snapshot(&self.messages, channel_id)?;

        let messages = self.messages.clone();
        let watched = channel_id.clone();
        let updates = stream::unfold(receiver, move |mut receiver| {
            let messages = messages.clone();
            let watched = watched.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(MessageChange::Updated(changed)) if changed == watched => {
                            return Some((Self::snapshot(&messages, &watched), receiver));
                        }
                        Ok(MessageChange::Updated(_)) => continue,
                        Ok(MessageChange::Failed(reason)) => {
                            return Some((Err(CoreError::classify(reason)), receiver));
                        }
                        Err(RecvError::Lagged(_)) => {
                            return Some((Self::snapshot(&messages, &watched), receiver));
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
        });

        Ok(stream::once(async move { Ok(initial) }).chain(updates).boxed())
    }
}
