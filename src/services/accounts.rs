/// Account service - registration, login, and the "me" operations
///
/// Every mutation here acts only on the caller's own user/profile row;
/// there is no cross-user mutation path.
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{AccountPatch, NewUser, UserStore};
use crate::error::{AppError, Result};
use crate::models::Account;
use crate::security::jwt::{self, TokenPair};
use crate::security::{hash_password, verify_password};
use crate::storage::PhotoStore;
use crate::validators::{validate_bio, validate_email, validate_password, validate_username};

/// Registration input, validated before anything touches storage.
#[derive(Debug, Clone)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Partial self-update; absent fields stay untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateMePayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

pub struct AccountService {
    users: Arc<dyn UserStore>,
    photos: PhotoStore,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, photos: PhotoStore) -> Self {
        Self { users, photos }
    }

    /// Register a new user. The profile is created alongside the user in
    /// the same transaction; duplicate username/email is a Conflict.
    pub async fn register(&self, payload: RegisterPayload) -> Result<(Account, TokenPair)> {
        validate_username(&payload.username)?;
        validate_email(&payload.email)?;
        validate_password(&payload.password)?;
        if payload.password != payload.password_confirm {
            return Err(AppError::Validation("Passwords don't match".to_string()));
        }

        if self
            .users
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "An account already exists under this username".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)?;

        let account = self
            .users
            .create(NewUser {
                username: payload.username,
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                password_hash,
            })
            .await?;

        let tokens = jwt::issue_token_pair(account.user.id)?;

        Ok((account, tokens))
    }

    /// Verify credentials and mint a token pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let account = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(password, &account.user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        jwt::issue_token_pair(account.user.id)
    }

    /// Exchange a refresh token for a fresh access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String> {
        jwt::refresh_access_token(refresh_token)
    }

    pub async fn me(&self, caller: Uuid) -> Result<Account> {
        self.users
            .find_by_id(caller)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_me(&self, caller: Uuid, payload: UpdateMePayload) -> Result<Account> {
        if let Some(username) = &payload.username {
            validate_username(username)?;
        }
        if let Some(email) = &payload.email {
            validate_email(email)?;
        }
        if let Some(bio) = &payload.bio {
            validate_bio(bio)?;
        }

        self.users
            .update(
                caller,
                AccountPatch {
                    username: payload.username,
                    email: payload.email,
                    first_name: payload.first_name,
                    last_name: payload.last_name,
                    bio: payload.bio,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Delete the caller's account and everything it owns.
    pub async fn delete_me(&self, caller: Uuid) -> Result<()> {
        if !self.users.delete(caller).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        // Blob store cleanup happens after the transactional cascade; a
        // leftover file is harmless, a dangling profile row is not.
        self.photos.clear(caller).await?;

        Ok(())
    }

    pub async fn get_public_user(&self, username: &str) -> Result<Account> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    /// Store the caller's profile photo and record its key.
    pub async fn upload_photo(&self, caller: Uuid, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(AppError::Validation("Photo is empty".to_string()));
        }

        self.me(caller).await?;

        let key = self.photos.set(caller, bytes).await?;
        self.users.set_photo_key(caller, Some(&key)).await?;

        Ok(())
    }

    /// Clear the caller's profile photo. Clearing an absent photo is a no-op.
    pub async fn delete_photo(&self, caller: Uuid) -> Result<()> {
        self.me(caller).await?;

        self.photos.clear(caller).await?;
        self.users.set_photo_key(caller, None).await?;

        Ok(())
    }
}
