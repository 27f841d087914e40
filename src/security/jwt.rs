/// JWT issuing and validation (HS256)
///
/// Keys are initialized once at startup from configuration and held in a
/// process-wide cell so handlers and extractors can validate tokens without
/// threading key material through every call site.
///
/// Two token types are minted: short-lived `access` tokens that authenticate
/// requests, and longer-lived `refresh` tokens accepted only by the refresh
/// endpoint.
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

static KEYS: OnceCell<JwtKeys> = OnceCell::new();

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Access/refresh token pair returned on register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Initialize signing keys. Fails if called twice.
pub fn initialize(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Result<()> {
    let keys = JwtKeys {
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
        access_ttl_secs,
        refresh_ttl_secs,
    };

    KEYS.set(keys)
        .map_err(|_| AppError::Internal("JWT keys already initialized".to_string()))
}

fn keys() -> Result<&'static JwtKeys> {
    KEYS.get()
        .ok_or_else(|| AppError::Internal("JWT keys not initialized".to_string()))
}

fn issue(user_id: Uuid, token_type: &str, ttl_secs: i64) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        token_type: token_type.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(&Header::new(Algorithm::HS256), &claims, &keys()?.encoding)
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Mint an access/refresh pair for a user.
pub fn issue_token_pair(user_id: Uuid) -> Result<TokenPair> {
    let k = keys()?;
    Ok(TokenPair {
        access: issue(user_id, "access", k.access_ttl_secs)?,
        refresh: issue(user_id, "refresh", k.refresh_ttl_secs)?,
    })
}

fn validate(token: &str, expected_type: &str) -> Result<Uuid> {
    let data = decode::<Claims>(
        token,
        &keys()?.decoding,
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    if data.claims.token_type != expected_type {
        return Err(AppError::Unauthorized("Wrong token type".to_string()));
    }

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid subject in token".to_string()))
}

/// Validate a bearer access token and return the caller's user id.
pub fn validate_access_token(token: &str) -> Result<Uuid> {
    validate(token, "access")
}

/// Exchange a valid refresh token for a new access token.
pub fn refresh_access_token(refresh_token: &str) -> Result<String> {
    let user_id = validate(refresh_token, "refresh")?;
    issue(user_id, "access", keys()?.access_ttl_secs)
}
