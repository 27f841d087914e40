/// Reaction service - the one-reaction-per-user-per-post invariant
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{Page, PostStore, ReactionCounts, ReactionFilter, ReactionStore};
use crate::error::{AppError, Result};
use crate::models::{Reaction, ReactionType};

pub struct ReactionService {
    reactions: Arc<dyn ReactionStore>,
    posts: Arc<dyn PostStore>,
}

impl ReactionService {
    pub fn new(reactions: Arc<dyn ReactionStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { reactions, posts }
    }

    async fn require_post(&self, post_id: Uuid) -> Result<()> {
        self.posts
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;
        Ok(())
    }

    /// Create or overwrite the caller's reaction to a post.
    ///
    /// The store-level upsert is atomic: if the caller already reacted, the
    /// type is overwritten and `updated_at` refreshed while id and
    /// `created_at` stay put; concurrent calls collapse onto the uniqueness
    /// constraint instead of surfacing a conflict.
    pub async fn set_reaction(
        &self,
        caller: Uuid,
        post_id: Uuid,
        reaction_type: &str,
    ) -> Result<Reaction> {
        let reaction_type = ReactionType::parse(reaction_type).ok_or_else(|| {
            AppError::Validation(format!("Invalid reaction type: {}", reaction_type))
        })?;

        self.require_post(post_id).await?;

        self.reactions.upsert(caller, post_id, reaction_type).await
    }

    /// Remove the caller's reaction. Post existence is checked first, so a
    /// missing post and a missing reaction both yield NotFound.
    pub async fn remove_reaction(&self, caller: Uuid, post_id: Uuid) -> Result<()> {
        self.require_post(post_id).await?;

        if !self.reactions.delete(caller, post_id).await? {
            return Err(AppError::NotFound(format!(
                "No reaction by this user on post {}",
                post_id
            )));
        }

        Ok(())
    }

    /// The caller's own reaction to a post.
    pub async fn my_reaction(&self, caller: Uuid, post_id: Uuid) -> Result<Reaction> {
        self.require_post(post_id).await?;

        self.reactions
            .find(caller, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No reaction on post {}", post_id)))
    }

    pub async fn list_reactions(
        &self,
        filter: &ReactionFilter,
        page: Page,
    ) -> Result<Vec<Reaction>> {
        self.reactions.list(filter, page).await
    }

    /// Like/dislike totals for a post, computed at request time.
    pub async fn get_reaction_counts(&self, post_id: Uuid) -> Result<ReactionCounts> {
        self.require_post(post_id).await?;
        self.reactions.counts(post_id).await
    }
}
