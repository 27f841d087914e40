use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{CommentFilter, CommentStore, Page};
use crate::error::Result;
use crate::models::Comment;

/// PostgreSQL-backed comment repository.
#[derive(Clone)]
pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentRepo {
    async fn create(&self, post_id: Uuid, author_id: Uuid, content: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_id, content, created_at
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_id, content, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list(&self, filter: &CommentFilter, page: Page) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_id, content, created_at
            FROM comments
            WHERE ($1::uuid IS NULL OR post_id = $1)
              AND ($2::uuid IS NULL OR author_id = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
            ORDER BY created_at ASC, id ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.post)
        .bind(filter.author)
        .bind(filter.created_after)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
