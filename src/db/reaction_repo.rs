use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::{Page, ReactionCounts, ReactionFilter, ReactionStore};
use crate::error::Result;
use crate::models::{Reaction, ReactionType};

/// PostgreSQL-backed reaction repository.
///
/// The one-reaction-per-(user, post) invariant lives in the
/// `reactions_user_post_unique` constraint; `upsert` leans on it so two
/// concurrent calls can never insert two rows.
#[derive(Clone)]
pub struct PgReactionRepo {
    pool: PgPool,
}

impl PgReactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionStore for PgReactionRepo {
    async fn upsert(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        reaction_type: ReactionType,
    ) -> Result<Reaction> {
        // Single atomic statement: a constraint conflict becomes the update
        // path, preserving id and created_at.
        let reaction = sqlx::query_as::<_, Reaction>(
            r#"
            INSERT INTO reactions (user_id, post_id, reaction_type)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT reactions_user_post_unique
            DO UPDATE SET reaction_type = EXCLUDED.reaction_type, updated_at = NOW()
            RETURNING id, user_id, post_id, reaction_type, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(reaction_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(reaction)
    }

    async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Reaction>> {
        let reaction = sqlx::query_as::<_, Reaction>(
            r#"
            SELECT id, user_id, post_id, reaction_type, created_at, updated_at
            FROM reactions
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reaction)
    }

    async fn list(&self, filter: &ReactionFilter, page: Page) -> Result<Vec<Reaction>> {
        let reactions = sqlx::query_as::<_, Reaction>(
            r#"
            SELECT id, user_id, post_id, reaction_type, created_at, updated_at
            FROM reactions
            WHERE ($1::uuid IS NULL OR post_id = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
              AND ($3::reaction_kind IS NULL OR reaction_type = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
            ORDER BY created_at ASC, id ASC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.post)
        .bind(filter.user)
        .bind(filter.reaction_type)
        .bind(filter.created_after)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(reactions)
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reactions WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn counts(&self, post_id: Uuid) -> Result<ReactionCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE reaction_type = 'like') AS likes,
                COUNT(*) FILTER (WHERE reaction_type = 'dislike') AS dislikes
            FROM reactions
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ReactionCounts {
            likes: row.get::<i64, _>("likes"),
            dislikes: row.get::<i64, _>("dislikes"),
        })
    }
}
