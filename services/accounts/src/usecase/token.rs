use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::domain::types::{User, UserRole};
use crate::error::AccountsServiceError;

/// Access token lifetime in seconds (15 minutes).
pub const ACCESS_TOKEN_EXP: u64 = 15 * 60;

/// Refresh token lifetime in seconds (30 days).
pub const REFRESH_TOKEN_EXP: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id.
    pub sub: String,
    pub role: UserRole,
    /// Expiry as a unix timestamp.
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn issue_token(user: &User, secret: &str, ttl: u64) -> Result<String, AccountsServiceError> {
    let claims = TokenClaims {
        sub: user.id.to_string(),
        role: user.role,
        exp: now_secs() + ttl,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("encode jwt")?;
    Ok(token)
}

pub fn issue_access_token(user: &User, secret: &str) -> Result<String, AccountsServiceError> {
    issue_token(user, secret, ACCESS_TOKEN_EXP)
}

pub fn issue_refresh_token(user: &User, secret: &str) -> Result<String, AccountsServiceError> {
    issue_token(user, secret, REFRESH_TOKEN_EXP)
}
