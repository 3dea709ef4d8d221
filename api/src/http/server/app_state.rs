use std::sync::Arc;

use groupsync_core::domain::{
    channel::ports::ChannelService, group::ports::GroupService, identity::ports::AuthService,
    message::ports::MessageService, user::ports::UserService,
};

/// Everything the HTTP layer needs from the core service, whatever store backs it.
pub trait SyncService:
    AuthService + UserService + GroupService + ChannelService + MessageService + 'static
{
}

impl<T> SyncService for T where
    T: AuthService + UserService + GroupService + ChannelService + MessageService + 'static
{
}

/// Application state shared across request handlers
pub struct AppState<S: SyncService> {
    pub service: Arc<S>,
}

impl<S: SyncService> AppState<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<S: SyncService> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}
