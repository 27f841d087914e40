use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{AccountPatch, NewUser, UserStore};
use crate::error::Result;
use crate::models::{Account, Profile, User};

/// PostgreSQL-backed user/profile repository.
///
/// A user and its profile are created and deleted together; the profile
/// never exists on its own.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_account(&self, id: Uuid) -> Result<Option<Account>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, password_hash,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, bio, photo_key, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(Account { user, profile }))
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn create(&self, new_user: NewUser) -> Result<Account> {
        let mut tx = self.pool.begin().await?;

        // Unique violations on username/email surface as Conflict.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, first_name, last_name, password_hash,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .fetch_one(tx.as_mut())
        .await?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id)
            VALUES ($1)
            RETURNING user_id, bio, photo_key, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .fetch_one(tx.as_mut())
        .await?;

        tx.commit().await?;

        Ok(Account { user, profile })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        self.fetch_account(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let user_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match user_id {
            Some(id) => self.fetch_account(id).await,
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Option<Account>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.username)
        .bind(&patch.email)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .execute(tx.as_mut())
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        if patch.bio.is_some() {
            sqlx::query(
                r#"
                UPDATE profiles
                SET bio = $2, updated_at = NOW()
                WHERE user_id = $1
                "#,
            )
            .bind(id)
            .bind(&patch.bio)
            .execute(tx.as_mut())
            .await?;
        }

        tx.commit().await?;

        self.fetch_account(id).await
    }

    async fn set_photo_key(&self, id: Uuid, photo_key: Option<&str>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET photo_key = $2, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .bind(photo_key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        // Ordered cascade: dependents of the user's posts first, then the
        // user's own content, then the profile, then the user row.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE user_id = $1
               OR post_id IN (SELECT id FROM posts WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(tx.as_mut())
        .await?;

        sqlx::query(
            r#"
            DELETE FROM comments
            WHERE author_id = $1
               OR post_id IN (SELECT id FROM posts WHERE author_id = $1)
            "#,
        )
        .bind(id)
        .execute(tx.as_mut())
        .await?;

        sqlx::query("DELETE FROM posts WHERE author_id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
