/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{Page, PostFilter};
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub author: Option<Uuid>,
    pub created_after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create a new post. The author is the authenticated caller.
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.posts.clone());
    let post = service.create_post(user_id.0, &req.content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID (public).
pub async fn get_post(state: web::Data<AppState>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new(state.posts.clone());
    let post = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// List posts with optional author / created_after filters (public).
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.posts.clone());
    let filter = PostFilter {
        author: query.author,
        created_after: query.created_after,
    };
    let posts = service
        .list_posts(&filter, Page::new(query.limit, query.offset))
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Delete a post. Author-only; cascades to comments and reactions.
pub async fn delete_post(
    state: web::Data<AppState>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.posts.clone());
    service.delete_post(user_id.0, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
