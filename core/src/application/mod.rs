use mongodb::{Client, Database, bson::doc};

use crate::{
    domain::{
        channel::ports::InMemoryChannelRepository,
        common::{CoreError, services::Service},
        group::ports::InMemoryGroupRepository,
        identity::ports::InMemoryIdentityRepository,
        message::ports::InMemoryMessageRepository,
        storage::ports::InMemoryObjectStorage,
        user::ports::InMemoryUserRepository,
    },
    infrastructure::{
        channel::repositories::mongo::MongoChannelRepository,
        group::repositories::mongo::MongoGroupRepository,
        identity::repositories::reqwest::ReqwestIdentityRepository,
        message::repositories::mongo::MongoMessageRepository,
        storage::repositories::reqwest::ReqwestObjectStorage,
        user::repositories::mongo::MongoUserRepository,
    },
};

/// Concrete service type backed by MongoDB and the HTTP identity and content services.
pub type GroupSyncService = Service<
    MongoGroupRepository,
    MongoChannelRepository,
    MongoMessageRepository,
    MongoUserRepository,
    ReqwestIdentityRepository,
    ReqwestObjectStorage,
>;

/// Service type running entirely in process memory.
pub type InMemoryService = Service<
    InMemoryGroupRepository,
    InMemoryChannelRepository,
    InMemoryMessageRepository,
    InMemoryUserRepository,
    InMemoryIdentityRepository,
    InMemoryObjectStorage,
>;

/// Where the remote collaborators live.
#[derive(Clone, Debug)]
pub struct RemoteEndpoints {
    pub mongo_uri: String,
    pub database: String,
    pub identity_url: String,
    pub content_url: String,
}

#[derive(Clone)]
pub struct GroupSyncRepositories {
    db: Database,
    pub group_repository: MongoGroupRepository,
    pub channel_repository: MongoChannelRepository,
    pub message_repository: MongoMessageRepository,
    pub user_repository: MongoUserRepository,
    pub identity_repository: ReqwestIdentityRepository,
    pub storage_repository: ReqwestObjectStorage,
}

pub async fn create_repositories(
    endpoints: RemoteEndpoints,
) -> Result<GroupSyncRepositories, CoreError> {
    let client = Client::with_uri_str(&endpoints.mongo_uri)
        .await
        .map_err(|e| CoreError::NetworkUnavailable { msg: e.to_string() })?;
    let db = client.database(&endpoints.database);

    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!(database = %endpoints.database, "Connected to MongoDB");

    let http = reqwest::Client::new();

    Ok(GroupSyncRepositories {
        group_repository: MongoGroupRepository::new(&db),
        channel_repository: MongoChannelRepository::new(&db),
        message_repository: MongoMessageRepository::new(&db),
        user_repository: MongoUserRepository::new(&db),
        identity_repository: ReqwestIdentityRepository::new(endpoints.identity_url, http.clone()),
        storage_repository: ReqwestObjectStorage::new(endpoints.content_url, http),
        db,
    })
}

impl From<GroupSyncRepositories> for GroupSyncService {
    fn from(repositories: GroupSyncRepositories) -> Self {
        Service::new(
            repositories.group_repository,
            repositories.channel_repository,
            repositories.message_repository,
            repositories.user_repository,
            repositories.identity_repository,
            repositories.storage_repository,
        )
    }
}

impl GroupSyncRepositories {
    pub async fn shutdown(&self) {
        self.db.client().clone().shutdown().await;
    }
}

pub fn in_memory_service() -> InMemoryService {
    Service::new(
        InMemoryGroupRepository::new(),
        InMemoryChannelRepository::new(),
        InMemoryMessageRepository::new(),
        InMemoryUserRepository::new(),
        InMemoryIdentityRepository::new(),
        InMemoryObjectStorage::new(),
    )
}
