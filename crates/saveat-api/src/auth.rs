//! # Authentication Extractors
//!
//! Bearer-token authentication for protected routes, as axum extractors
//! rather than request-mutating middleware: a handler that needs the
//! caller declares [`CurrentAdmin`] (or [`AdminOnly`]) as a parameter
//! and receives the resolved identity as an explicit value.
//!
//! Gate order is enforced by construction — [`AdminOnly`] runs the
//! token gate internally before the role check, so the role gate can
//! never run standalone.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use saveat_auth::verify_token;
use saveat_core::{AdminPublic, AdminRole};

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
///
/// Extraction fails with 401 when the `Authorization` header is missing
/// or does not carry the `Bearer` scheme, when the token fails
/// verification (bad signature, malformed, expired), or when the token's
/// subject no longer corresponds to a stored administrator.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminPublic);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("no token".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("token failed".to_string()))?;

        // Re-resolve the subject: a token may outlive its account.
        let admin = state
            .admins
            .get(claims.sub)
            .ok_or_else(|| AppError::Unauthorized("admin not found".to_string()))?;

        Ok(Self(AdminPublic::from(&admin)))
    }
}

/// The authenticated caller, additionally required to hold the `admin`
/// role. Composes on top of [`CurrentAdmin`]: the token gate always runs
/// first, and a valid non-admin session gets 403, not 401.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub AdminPublic);

#[async_trait]
impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentAdmin(admin) = CurrentAdmin::from_request_parts(parts, state).await?;
        if admin.role != AdminRole::Admin {
            return Err(AppError::Forbidden("admin role required".to_string()));
        }
        Ok(Self(admin))
    }
}
