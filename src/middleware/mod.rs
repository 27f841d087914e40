/// HTTP middleware utilities for murmur-service
///
/// Bearer-token authentication is implemented as an extractor: any handler
/// taking a `UserId` parameter requires a valid access token, while public
/// read handlers simply omit it. This keeps a single authentication path
/// even when one resource mixes public GETs with authenticated mutations.
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::security::jwt;

/// Authenticated caller identity, extracted from the Authorization header.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(extract_user_id(req))
    }
}

fn extract_user_id(req: &HttpRequest) -> Result<UserId, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".to_string()))?;

    let user_id = jwt::validate_access_token(token)?;
    Ok(UserId(user_id))
}
