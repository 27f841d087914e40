use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Page, PostFilter, PostStore};
use crate::error::Result;
use crate::models::Post;

/// PostgreSQL-backed post repository.
#[derive(Clone)]
pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostRepo {
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, created_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>> {
        // Stable (created_at, id) order keeps offset pagination exactly-once.
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE ($1::uuid IS NULL OR author_id = $1)
              AND ($2::timestamptz IS NULL OR created_at >= $2)
            ORDER BY created_at ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.author)
        .bind(filter.created_after)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // Dependents go first so an aborted request leaves no orphans.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reactions WHERE post_id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
