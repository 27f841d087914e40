/// Murmur Service Library
///
/// A small social posting backend: accounts with profiles, short posts,
/// comments, and like/dislike reactions.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and their request/response types
/// - `models`: Data structures for users, posts, comments, reactions
/// - `services`: Business logic layer
/// - `db`: Storage traits and PostgreSQL repositories
/// - `storage`: Profile photo blob storage
/// - `security`: Password hashing and token issuing
/// - `middleware`: Authenticated-caller extraction
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod storage;
pub mod validators;

pub use app_state::AppState;
pub use config::Config;
pub use error::{AppError, Result};
