pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{
    GroupSyncRepositories, GroupSyncService, InMemoryService, RemoteEndpoints,
    create_repositories, in_memory_service,
};
pub use domain::common::{CoreError, ErrorKind, services::Service};
pub use domain::message::subscription::{MessageFeed, MessageSubscription, SubscriptionState};
