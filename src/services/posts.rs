/// Post service - creation, retrieval, listing, and owner-only deletion
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{Page, PostFilter, PostStore};
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::validators::validate_content;

pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// Create a post authored by the caller. The author is always the
    /// authenticated identity, never client-supplied input.
    pub async fn create_post(&self, caller: Uuid, content: &str) -> Result<Post> {
        validate_content(content)?;
        self.posts.create(caller, content).await
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post> {
        self.posts
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    pub async fn list_posts(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>> {
        self.posts.list(filter, page).await
    }

    /// Delete a post. Existence is checked before ownership, so a missing
    /// post is NotFound regardless of who asks. Comments and reactions go
    /// with it.
    pub async fn delete_post(&self, caller: Uuid, id: Uuid) -> Result<()> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

        if post.author_id != caller {
            return Err(AppError::Forbidden(
                "Only the author can delete this post".to_string(),
            ));
        }

        self.posts.delete(id).await
    }
}
