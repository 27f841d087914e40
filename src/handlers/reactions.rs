/// Reaction handlers - HTTP endpoints for like/dislike operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{Page, ReactionFilter};
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::ReactionType;
use crate::services::ReactionService;

#[derive(Debug, Deserialize)]
pub struct CreateReactionRequest {
    pub post_id: Uuid,
    /// "like" or "dislike"; anything else is a validation error.
    pub reaction_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ReactionListQuery {
    pub post: Option<Uuid>,
    pub user: Option<Uuid>,
    pub reaction_type: Option<ReactionType>,
    pub created_after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReactionCountResponse {
    pub post_id: Uuid,
    pub likes: i64,
    pub dislikes: i64,
}

/// Create or update the caller's reaction to a post.
pub async fn create_reaction(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreateReactionRequest>,
) -> Result<HttpResponse> {
    let service = ReactionService::new(state.reactions.clone(), state.posts.clone());
    let reaction = service
        .set_reaction(user_id.0, req.post_id, &req.reaction_type)
        .await?;

    Ok(HttpResponse::Created().json(reaction))
}

/// Delete the caller's reaction to a post.
pub async fn delete_reaction(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ReactionService::new(state.reactions.clone(), state.posts.clone());
    service.remove_reaction(user_id.0, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// List reactions with optional post / user / type / created_after filters (public).
pub async fn list_reactions(
    state: web::Data<AppState>,
    query: web::Query<ReactionListQuery>,
) -> Result<HttpResponse> {
    let service = ReactionService::new(state.reactions.clone(), state.posts.clone());
    let filter = ReactionFilter {
        post: query.post,
        user: query.user,
        reaction_type: query.reaction_type,
        created_after: query.created_after,
    };
    let reactions = service
        .list_reactions(&filter, Page::new(query.limit, query.offset))
        .await?;

    Ok(HttpResponse::Ok().json(reactions))
}

/// Like/dislike counts for a post (public).
pub async fn get_reaction_counts(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ReactionService::new(state.reactions.clone(), state.posts.clone());
    let counts = service.get_reaction_counts(*post_id).await?;

    Ok(HttpResponse::Ok().json(ReactionCountResponse {
        post_id: *post_id,
        likes: counts.likes,
        dislikes: counts.dislikes,
    }))
}

/// The caller's own reaction to a post.
pub async fn get_my_reaction(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ReactionService::new(state.reactions.clone(), state.posts.clone());
    let reaction = service.my_reaction(user_id.0, *post_id).await?;

    Ok(HttpResponse::Ok().json(reaction))
}
