/// Database access layer
///
/// Persistence sits behind one narrow trait per entity so the service layer
/// (authorization rules, the reaction upsert, filtering) depends only on
/// these interfaces. Production implementations wrap a `PgPool`; the
/// integration tests provide in-memory ones.
pub mod comment_repo;
pub mod post_repo;
pub mod reaction_repo;
pub mod user_repo;

pub use comment_repo::PgCommentRepo;
pub use post_repo::PgPostRepo;
pub use reaction_repo::PgReactionRepo;
pub use user_repo::PgUserRepo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, Comment, Post, Reaction, ReactionType};

/// Offset pagination over a stable (created_at, id) order.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

impl Page {
    /// Clamp client-supplied values into sane bounds.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Equality filters for post listings; omitted fields impose no constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFilter {
    pub author: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentFilter {
    pub post: Option<Uuid>,
    pub author: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionFilter {
    pub post: Option<Uuid>,
    pub user: Option<Uuid>,
    pub reaction_type: Option<ReactionType>,
    pub created_after: Option<DateTime<Utc>>,
}

/// Like/dislike totals for a post, computed at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Fields required to register a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Partial account update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user and its profile in one transaction.
    /// Duplicate username or email yields `Conflict`.
    async fn create(&self, new_user: NewUser) -> Result<Account>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Apply a partial update; returns the updated account, or `None` if the
    /// user no longer exists.
    async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Option<Account>>;

    /// Record (or clear) the profile photo key.
    async fn set_photo_key(&self, id: Uuid, photo_key: Option<&str>) -> Result<bool>;

    /// Delete the user and everything it owns: reactions, comments, posts
    /// (with their comments and reactions), and the profile — in that order,
    /// inside one transaction. Returns `false` if the user did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post>;

    async fn find(&self, id: Uuid) -> Result<Option<Post>>;

    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>>;

    /// Delete the post along with its comments and reactions, transactionally.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, post_id: Uuid, author_id: Uuid, content: &str) -> Result<Comment>;

    async fn find(&self, id: Uuid) -> Result<Option<Comment>>;

    async fn list(&self, filter: &CommentFilter, page: Page) -> Result<Vec<Comment>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Atomically create the caller's reaction or overwrite its type.
    /// On overwrite, id and `created_at` are preserved and `updated_at`
    /// is refreshed. Concurrent calls for the same (user, post) never
    /// produce two rows.
    async fn upsert(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        reaction_type: ReactionType,
    ) -> Result<Reaction>;

    async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Reaction>>;

    async fn list(&self, filter: &ReactionFilter, page: Page) -> Result<Vec<Reaction>>;

    /// Returns `false` if no reaction existed for (user, post).
    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    async fn counts(&self, post_id: Uuid) -> Result<ReactionCounts>;
}
