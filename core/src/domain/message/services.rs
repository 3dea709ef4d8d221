use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::{
    channel::{entities::ChannelId, ports::ChannelRepository},
    common::{CoreError, services::Service},
    group::ports::GroupRepository,
    identity::{entities::Session, ports::IdentityRepository},
    message::{
        entities::{ImageUpload, Message, MessageId, NewMessage, sort_by_sent_at},
        ports::{MessageRepository, MessageService},
        subscription::{MessageSubscription, SubscriptionState},
    },
    storage::ports::{ObjectStorageRepository, message_image_path},
    user::{entities::User, ports::UserRepository},
};

/// Synthesized IDs get this many tries to find a free slot.
const MAX_ID_ATTEMPTS: usize = 3;

impl<G, C, M, U, I, O> Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    /// Uploads the image, if any, and creates the message under `id`.
    async fn write_message(
        &self,
        channel_id: &ChannelId,
        id: MessageId,
        sender: &User,
        text: &str,
        image: Option<&ImageUpload>,
        sent_at: DateTime<Utc>,
    ) -> Result<Message, CoreError> {
        let image_url = match image {
            Some(image) => {
                let path = message_image_path(id.as_str());
                self.storage_repository
                    .put(&path, image.bytes.clone(), &image.content_type)
                    .await?;
                Some(self.storage_repository.download_url(&path).await?)
            }
            None => None,
        };

        let message = Message {
            id,
            sender_id: sender.id.clone(),
            text: text.to_string(),
            image_url,
            sender_username: sender.username.clone(),
            sender_profile_url: sender.profile_image_url.clone(),
            sent_at,
            edited: false,
        };

        self.message_repository.insert(channel_id, message).await
    }
}

impl<G, C, M, U, I, O> MessageService for Service<G, C, M, U, I, O>
where
    G: GroupRepository,
    C: ChannelRepository,
    M: MessageRepository,
    U: UserRepository,
    I: IdentityRepository,
    O: ObjectStorageRepository,
{
    async fn send_message(
        &self,
        session: &Session,
        channel_id: &ChannelId,
        message: NewMessage,
    ) -> Result<Message, CoreError> {
        let identity = self.authenticate(session).await?;

        if channel_id.is_blank() {
            return Err(CoreError::InvalidIdentifier { field: "channel_id" });
        }
        if message.text.trim().is_empty() && message.image.is_none() {
            return Err(CoreError::EmptyMessage);
        }

        let channel = self
            .channel_repository
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| CoreError::ChannelNotFound {
                id: channel_id.clone(),
            })?;

        let sender = self
            .user_repository
            .find_by_id(&identity.user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound {
                id: identity.user_id.clone(),
            })?;

        // Stores keep millisecond precision; stamp at that precision so the
        // returned message matches what is read back.
        let sent_at = Utc::now().trunc_subsecs(3);
        let NewMessage { id: requested, text, image } = message;
        let supplied = requested.filter(|id| !id.is_blank());
        let base = supplied
            .clone()
            .unwrap_or_else(|| MessageId::synthesize(sent_at, &sender.id));

        let mut id = base.clone();
        let mut attempts = 0;
        let message = loop {
            attempts += 1;

            if let Some(existing) = self.message_repository.find_by_id(&channel.id, &id).await? {
                if supplied.is_some() {
                    if existing.sender_id != sender.id {
                        warn!(channel_id = %channel.id, message_id = %id, "Message ID belongs to another sender");
                        return Err(CoreError::NotMessageSender { id });
                    }
                    debug!(channel_id = %channel.id, message_id = %id, "Message already stored");
                    break existing;
                }
                if attempts >= MAX_ID_ATTEMPTS {
                    return Err(CoreError::MessageAlreadyExists {
                        channel_id: channel.id.clone(),
                        id,
                    });
                }
                id = base.disambiguate();
                continue;
            }

            match self
                .write_message(&channel.id, id.clone(), &sender, &text, image.as_ref(), sent_at)
                .await
            {
                Ok(stored) => break stored,
                // Lost a race for the ID; the next pass sees the winner.
                Err(CoreError::MessageAlreadyExists { .. }) if attempts < MAX_ID_ATTEMPTS => continue,
                Err(e) => {
                    error!(channel_id = %channel.id, error = %e, kind = ?e.kind(), "Failed to store message");
                    return Err(e);
                }
            }
        };

        // The subcollection write above is authoritative; a failure here leaves
        // the index behind and a retry with the same ID repairs it.
        let appended = self
            .channel_repository
            .append_message(&channel.id, &message.id)
            .await
            .inspect_err(|e| {
                error!(
                    channel_id = %channel.id,
                    message_id = %message.id,
                    error = %e,
                    "Message stored but channel index update failed"
                );
            })?;

        debug!(channel_id = %channel.id, message_id = %message.id, appended, "Message sent");
        Ok(message)
    }

    async fn get_messages(&self, channel_id: &ChannelId) -> Result<Vec<Message>, CoreError> {
        if channel_id.is_blank() {
            return Ok(Vec::new());
        }

        let mut messages = self.message_repository.list_by_channel(channel_id).await?;
        sort_by_sent_at(&mut messages);
        Ok(messages)
    }

    async fn subscribe_to_messages(
        &self,
        channel_id: &ChannelId,
    ) -> Result<MessageSubscription, CoreError> {
        if channel_id.is_blank() {
            return Err(CoreError::InvalidIdentifier { field: "channel_id" });
        }

        let (state, _) = watch::channel(SubscriptionState::Subscribing);
        let snapshots = match self.message_repository.watch(channel_id).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                state.send_replace(SubscriptionState::Unsubscribed);
                error!(channel_id = %channel_id, error = %e, "Failed to subscribe to messages");
                return Err(e);
            }
        };

        info!(channel_id = %channel_id, "Subscribed to messages");
        Ok(MessageSubscription::start(
            channel_id.clone(),
            snapshots,
            state,
        ))
    }

    async fn edit_message(
        &self,
        session: &Session,
        channel_id: &ChannelId,
        message_id: &MessageId,
        text: &str,
    ) -> Result<Message, CoreError> {
        let identity = self.authenticate(session).await?;

        if text.trim().is_empty() {
            return Err(CoreError::EmptyMessage);
        }

        let existing = self
            .message_repository
            .find_by_id(channel_id, message_id)
            .await?
            .ok_or_else(|| CoreError::MessageNotFound {
                channel_id: channel_id.clone(),
                id: message_id.clone(),
            })?;

        if existing.sender_id != identity.user_id {
            return Err(CoreError::NotMessageSender {
                id: message_id.clone(),
            });
        }

        self.message_repository
            .update_text(channel_id, message_id, text.to_string())
            .await
    }
}
