//! Live views of a channel's messages.
//!
//! A [`MessageSubscription`] owns a background task that turns store change
//! notifications into full, sorted snapshots and pushes them into a
//! single-consumer channel. Cancelling it stops the task and closes the
//! channel. [`MessageFeed`] is the consumer-side holder that keeps at most
//! one subscription alive.

use std::sync::Arc;

use futures::{Stream, StreamExt, stream};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::domain::{
    channel::entities::ChannelId,
    common::CoreError,
    message::{
        entities::{Message, sort_by_sent_at},
        ports::{MessageService, MessageSnapshots},
    },
};

/// Snapshots buffered between the listener task and a slow consumer.
pub const SNAPSHOT_BUFFER: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribing,
    Active,
}

pub struct MessageSubscription {
    channel_id: ChannelId,
    receiver: mpsc::Receiver<Vec<Message>>,
    state: Arc<watch::Sender<SubscriptionState>>,
    task: JoinHandle<()>,
    cancelled: bool,
}

impl MessageSubscription {
    /// Spawns the listener task over an established snapshot stream.
    pub(crate) fn start(
        channel_id: ChannelId,
        mut snapshots: MessageSnapshots,
        state: watch::Sender<SubscriptionState>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(SNAPSHOT_BUFFER);
        let state = Arc::new(state);
        state.send_replace(SubscriptionState::Active);

        let task_state = state.clone();
        let task_channel = channel_id.clone();
        let task = tokio::spawn(async move {
            while let Some(snapshot) = snapshots.next().await {
                match snapshot {
                    Ok(mut messages) => {
                        sort_by_sent_at(&mut messages);
                        debug!(
                            channel_id = %task_channel,
                            count = messages.len(),
                            "Delivering message snapshot"
                        );
                        if sender.send(messages).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(
                            channel_id = %task_channel,
                            error = %e,
                            "Message subscription stopped on transport error"
                        );
                        break;
                    }
                }
            }
            task_state.send_replace(SubscriptionState::Unsubscribed);
        });

        Self {
            channel_id,
            receiver,
            state,
            task,
            cancelled: false,
        }
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    pub fn state(&self) -> SubscriptionState {
        *self.state.borrow()
    }

    /// Waits for the next snapshot. Returns `None` once the subscription is
    /// cancelled or the listener has stopped.
    pub async fn next(&mut self) -> Option<Vec<Message>> {
        if self.cancelled {
            return None;
        }
        self.receiver.recv().await
    }

    /// Returns an already delivered snapshot without waiting.
    pub fn try_next(&mut self) -> Option<Vec<Message>> {
        if self.cancelled {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Stops the listener and discards undelivered snapshots.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.task.abort();
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
        self.state.send_replace(SubscriptionState::Unsubscribed);
        info!(channel_id = %self.channel_id, "Message subscription cancelled");
    }

    /// Turns the subscription into a stream of snapshots. Dropping the stream
    /// cancels the subscription.
    pub fn into_stream(self) -> impl Stream<Item = Vec<Message>> + Send + 'static {
        stream::unfold(self, |mut subscription| async move {
            let snapshot = subscription.next().await?;
            Some((snapshot, subscription))
        })
    }
}

impl Drop for MessageSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for MessageSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSubscription")
            .field("channel_id", &self.channel_id)
            .field("state", &self.state())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

/// Holds the single live subscription of one consumer, e.g. an open chat view.
#[derive(Debug, Default)]
pub struct MessageFeed {
    current: Option<MessageSubscription>,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any previous subscription, then subscribes to `channel_id`.
    pub async fn subscribe<S: MessageService>(
        &mut self,
        service: &S,
        channel_id: &ChannelId,
    ) -> Result<(), CoreError> {
        self.unsubscribe();
        let subscription = service.subscribe_to_messages(channel_id).await?;
        self.current = Some(subscription);
        Ok(())
    }

    pub fn unsubscribe(&mut self) {
        if let Some(mut subscription) = self.current.take() {
            subscription.cancel();
        }
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.current.as_ref().map(MessageSubscription::channel_id)
    }

    pub fn state(&self) -> SubscriptionState {
        self.current
            .as_ref()
            .map_or(SubscriptionState::Unsubscribed, MessageSubscription::state)
    }

    pub async fn next(&mut self) -> Option<Vec<Message>> {
        match self.current.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }
}
