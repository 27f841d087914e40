/// Account handlers - registration, tokens, and the "me" endpoints
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::Account;
use crate::security::jwt::TokenPair;
use crate::services::{AccountService, RegisterPayload, UpdateMePayload};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub bio: Option<String>,
    pub photo_key: Option<String>,
}

/// What anyone may see about a user.
#[derive(Debug, Serialize)]
pub struct UserPublicView {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: ProfileView,
}

/// What a user sees about themselves.
#[derive(Debug, Serialize)]
pub struct UserPrivateView {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: ProfileView,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserPrivateView,
    pub access: String,
    pub refresh: String,
}

impl From<Account> for UserPublicView {
    fn from(account: Account) -> Self {
        Self {
            username: account.user.username,
            first_name: account.user.first_name,
            last_name: account.user.last_name,
            profile: ProfileView {
                bio: account.profile.bio,
                photo_key: account.profile.photo_key,
            },
        }
    }
}

impl From<Account> for UserPrivateView {
    fn from(account: Account) -> Self {
        Self {
            id: account.user.id,
            username: account.user.username,
            email: account.user.email,
            first_name: account.user.first_name,
            last_name: account.user.last_name,
            profile: ProfileView {
                bio: account.profile.bio,
                photo_key: account.profile.photo_key,
            },
            created_at: account.user.created_at,
        }
    }
}

fn account_service(state: &web::Data<AppState>) -> AccountService {
    AccountService::new(state.users.clone(), state.photos.clone())
}

/// Register a new user.
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let (account, tokens) = account_service(&state)
        .register(RegisterPayload {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            password_confirm: req.password_confirm,
        })
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user: account.into(),
        access: tokens.access,
        refresh: tokens.refresh,
    }))
}

/// Obtain an access/refresh token pair from credentials.
pub async fn obtain_token_pair(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let tokens: TokenPair = account_service(&state)
        .login(&req.username, &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// Exchange a refresh token for a new access token.
pub async fn refresh_token(
    state: web::Data<AppState>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let access = account_service(&state).refresh(&req.refresh)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "access": access })))
}

/// Get the private view of the caller's own profile.
pub async fn get_me(state: web::Data<AppState>, user_id: UserId) -> Result<HttpResponse> {
    let account = account_service(&state).me(user_id.0).await?;

    Ok(HttpResponse::Ok().json(UserPrivateView::from(account)))
}

/// Partially update the caller's own user and profile fields.
pub async fn update_me(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<UpdateMeRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let account = account_service(&state)
        .update_me(
            user_id.0,
            UpdateMePayload {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(UserPrivateView::from(account)))
}

/// Delete the caller's account, cascading to everything it owns.
pub async fn delete_me(state: web::Data<AppState>, user_id: UserId) -> Result<HttpResponse> {
    account_service(&state).delete_me(user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Upload (or replace) the caller's profile photo. The body is the raw blob.
pub async fn upload_photo(
    state: web::Data<AppState>,
    user_id: UserId,
    body: web::Bytes,
) -> Result<HttpResponse> {
    account_service(&state).upload_photo(user_id.0, &body).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Remove the caller's profile photo.
pub async fn delete_photo(state: web::Data<AppState>, user_id: UserId) -> Result<HttpResponse> {
    account_service(&state).delete_photo(user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Get the public view of a user's profile by username.
pub async fn get_public_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let account = account_service(&state)
        .get_public_user(&username)
        .await?;

    Ok(HttpResponse::Ok().json(UserPublicView::from(account)))
}
