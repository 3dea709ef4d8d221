pub mod auth;
pub mod channels;
pub mod groups;
pub mod health;
pub mod messages;
pub mod server;
pub mod users;
