//! Blog API client

pub mod api;
pub mod auth_client;
pub mod blog;
pub mod models;
pub mod refresh;
pub mod session;
pub mod token_store;

pub use api::{AuthApi, CategoryApi, PostApi, TagApi};
pub use blog::{BlogClient, ClientOptions};
pub use session::{SessionSink, SessionState};
pub use token_store::{FileStorage, KeyValueStorage, TokenStore};
