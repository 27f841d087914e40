use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};

/// Input validation utilities for murmur-service

// Patterns are compiled once on first use.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern must compile")
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{3,32}$").expect("username pattern must compile")
});

/// Maximum content length for posts and comments, in characters.
pub const MAX_CONTENT_LEN: usize = 280;

/// Maximum biography length, in characters.
pub const MAX_BIO_LEN: usize = 100;

/// Validate post/comment content: non-empty, at most 280 characters.
pub fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(AppError::Validation("Content cannot be empty".to_string()));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LEN {
        return Err(AppError::Validation(format!(
            "Content exceeds {} characters (got {})",
            MAX_CONTENT_LEN, len
        )));
    }
    Ok(())
}

/// Validate profile biography: at most 100 characters.
pub fn validate_bio(bio: &str) -> Result<()> {
    let len = bio.chars().count();
    if len > MAX_BIO_LEN {
        return Err(AppError::Validation(format!(
            "Bio exceeds {} characters (got {})",
            MAX_BIO_LEN, len
        )));
    }
    Ok(())
}

/// Validate username format (3-32 characters, alphanumeric with - and _)
pub fn validate_username(username: &str) -> Result<()> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username must be 3-32 characters of letters, digits, '-' or '_'".to_string(),
        ))
    }
}

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> Result<()> {
    if !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid email address".to_string()))
    }
}

/// Validate password length (8-24 characters)
pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if !(8..=24).contains(&len) {
        return Err(AppError::Validation(
            "Password must be between 8 and 24 characters".to_string(),
        ));
    }
    Ok(())
}
