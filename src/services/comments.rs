/// Comment service - comments hang off posts and are owned by their author
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{CommentFilter, CommentStore, Page, PostStore};
use crate::error::{AppError, Result};
use crate::models::Comment;
use crate::validators::validate_content;

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { comments, posts }
    }

    /// Create a comment on an existing post, authored by the caller.
    /// The post is resolved against current state so a comment can never be
    /// attached to a post deleted moments earlier.
    pub async fn create_comment(
        &self,
        caller: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        validate_content(content)?;

        self.posts
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        self.comments.create(post_id, caller, content).await
    }

    pub async fn get_comment(&self, id: Uuid) -> Result<Comment> {
        self.comments
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))
    }

    pub async fn list_comments(&self, filter: &CommentFilter, page: Page) -> Result<Vec<Comment>> {
        self.comments.list(filter, page).await
    }

    /// Delete a comment. NotFound before Forbidden.
    pub async fn delete_comment(&self, caller: Uuid, id: Uuid) -> Result<()> {
        let comment = self
            .comments
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))?;

        if comment.author_id != caller {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }

        self.comments.delete(id).await
    }
}
