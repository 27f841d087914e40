/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{CommentFilter, Page};
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub post: Option<Uuid>,
    pub author: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create a comment on a post. The author is the authenticated caller.
pub async fn create_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.comments.clone(), state.posts.clone());
    let comment = service
        .create_comment(user_id.0, req.post_id, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get a comment by ID (public).
pub async fn get_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.comments.clone(), state.posts.clone());
    let comment = service.get_comment(*comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// List comments with optional post / author / created_after filters (public).
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentListQuery>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.comments.clone(), state.posts.clone());
    let filter = CommentFilter {
        post: query.post,
        author: query.author,
        created_after: query.created_after,
    };
    let comments = service
        .list_comments(&filter, Page::new(query.limit, query.offset))
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment. Author-only.
pub async fn delete_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.comments.clone(), state.posts.clone());
    service.delete_comment(user_id.0, *comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
