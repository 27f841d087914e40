/// Shared application state handed to every handler.
///
/// Handlers construct services per request from these store handles, so the
/// HTTP layer never touches a concrete storage backend directly.
use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{
    CommentStore, PgCommentRepo, PgPostRepo, PgReactionRepo, PgUserRepo, PostStore, ReactionStore,
    UserStore,
};
use crate::storage::PhotoStore;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub reactions: Arc<dyn ReactionStore>,
    pub photos: PhotoStore,
}

impl AppState {
    /// Production wiring: every store backed by the same Postgres pool.
    pub fn postgres(pool: PgPool, photos: PhotoStore) -> Self {
        Self {
            users: Arc::new(PgUserRepo::new(pool.clone())),
            posts: Arc::new(PgPostRepo::new(pool.clone())),
            comments: Arc::new(PgCommentRepo::new(pool.clone())),
            reactions: Arc::new(PgReactionRepo::new(pool)),
            photos,
        }
    }
}
