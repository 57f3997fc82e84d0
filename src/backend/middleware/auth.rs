/**
 * Authentication Middleware
 *
 * This module protects every contact and chat route. It extracts and
 * verifies the bearer token from the Authorization header and provides
 * the calling member to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::members::member_exists;
use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::MemberId;

/// Authenticated member data extracted from the JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub member_id: MemberId,
    pub nickname: String,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token signature and expiry
/// 3. Checks that the member still exists
/// 4. Attaches the member to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Auth token is not supplied")
        })?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

    let claims = verify_token(app_state.jwt_secret(), token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Token is not valid")
    })?;

    let exists = {
        let mut conn = app_state.db_pool.acquire().await?;
        member_exists(&mut conn, claims.memberid).await?
    };
    if !exists {
        tracing::warn!(memberid = claims.memberid, "Token for unknown member");
        return Err(BackendError::unauthorized("Token is not valid"));
    }

    request.extensions_mut().insert(AuthenticatedMember {
        member_id: claims.memberid,
        nickname: claims.nickname,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated member
///
/// Requires `auth_middleware` to have run on the route.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedMember);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let member = parts
            .extensions
            .get::<AuthenticatedMember>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedMember not found in request extensions");
                BackendError::unauthorized("Token is not valid")
            })?;

        Ok(AuthUser(member))
    }
}
