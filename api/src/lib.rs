pub mod app;
pub mod config;
pub mod http;
pub use app::App;
pub use config::Config;
pub use http::server::{ApiError, AppState, SyncService, app_router};
