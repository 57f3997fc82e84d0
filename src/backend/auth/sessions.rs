/**
 * Session Tokens
 *
 * This module handles JWT generation and validation. A token identifies
 * the calling member for every contact and chat endpoint; the member's id
 * and nickname are read from its claims.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::members::Member;
use crate::shared::MemberId;

/// Token lifetime in seconds (14 days)
pub const TOKEN_TTL_SECS: i64 = 14 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub memberid: MemberId,
    pub nickname: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Create a JWT token for a member
///
/// # Arguments
/// * `secret` - HMAC signing secret
/// * `member` - Member the token identifies
///
/// # Returns
/// JWT token string
pub fn create_token(secret: &str, member: &Member) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        memberid: member.memberid,
        nickname: member.nickname.clone(),
        email: member.email.clone(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `secret` - HMAC signing secret
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims, or an error for a bad signature or an expired token
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
