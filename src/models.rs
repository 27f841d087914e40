/// Data models for murmur-service
///
/// Entity records as they live in PostgreSQL, plus the reaction type
/// enumeration shared by the schema, the services, and the wire format.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Reaction type: a user either likes or dislikes a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "reaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Dislike => "dislike",
        }
    }

    /// Parse a client-supplied reaction type. Anything outside the
    /// enumeration is a validation failure, not a fallback to a default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(ReactionType::Like),
            "dislike" => Some(ReactionType::Dislike),
            _ => None,
        }
    }
}

/// User account row. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-to-one profile, created and deleted with its user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub photo_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User plus profile, the unit the account repository works in.
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub profile: Profile,
}

/// Short-form post. Immutable after creation except for deletion.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user's reaction to a post. `created_at` is set once; `updated_at`
/// moves when the reaction type is overwritten by the upsert.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Reaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
