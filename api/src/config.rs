use clap::Parser;
use clap::ValueEnum;
use groupsync_core::RemoteEndpoints;

#[derive(Clone, Parser, Debug)]
#[command(name = "groupsync-api")]
#[command(about = "Group, channel and message synchronization API", long_about = None)]
pub struct Config {
    #[arg(
        long = "store-backend",
        env = "STORE_BACKEND",
        value_enum,
        default_value = "mongo"
    )]
    pub backend: StoreBackend,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub remote: RemoteConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[arg(
        long = "environment",
        env = "ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: Environment,
}

impl Config {
    pub fn endpoints(&self) -> RemoteEndpoints {
        RemoteEndpoints {
            mongo_uri: self.database.uri.clone(),
            database: self.database.name.clone(),
            identity_url: self.remote.identity_url.clone(),
            content_url: self.remote.content_url.clone(),
        }
    }
}

#[derive(Clone, Parser, Debug)]
pub struct DatabaseConfig {
    #[arg(
        long = "mongo-uri",
        env = "MONGO_URI",
        default_value = "mongodb://localhost:27017"
    )]
    pub uri: String,

    #[arg(
        long = "mongo-database",
        env = "MONGO_DATABASE",
        default_value = "groupsync",
        value_name = "database_name"
    )]
    pub name: String,
}

#[derive(Clone, Parser, Debug)]
pub struct RemoteConfig {
    /// Base URL of the account service.
    #[arg(
        long = "identity-url",
        env = "IDENTITY_URL",
        default_value = "http://localhost:3003/"
    )]
    pub identity_url: String,

    /// Base URL of the content service that signs upload and download URLs.
    #[arg(
        long = "content-url",
        env = "CONTENT_URL",
        default_value = "http://localhost:3004/"
    )]
    pub content_url: String,
}

#[derive(Clone, Parser, Debug)]
pub struct ServerConfig {
    #[arg(
        long = "server-api-port",
        env = "API_PORT",
        default_value = "8080",
        name = "api_port"
    )]
    pub api_port: u16,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Mongo,
    /// Everything in process memory; state is lost on restart.
    Memory,
}

#[derive(Clone, Debug, ValueEnum, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}
