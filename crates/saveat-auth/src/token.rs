//! # Session Tokens
//!
//! HS256 JWT issuance and verification. A token carries the
//! administrator id (`sub`) and role as claims and expires 8 hours after
//! issuance. Signed with the process-wide secret from configuration.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use saveat_core::{AdminId, AdminRole};

use crate::error::AuthError;
use crate::secret::SecretString;

/// Session token lifetime: 8 hours.
pub const TOKEN_TTL: Duration = Duration::hours(8);

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the administrator id.
    pub sub: AdminId,
    /// Role claim, checked by the role gate without a store round-trip.
    pub role: AdminRole,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp), `iat` + [`TOKEN_TTL`].
    pub exp: i64,
}

/// Issue a signed session token for an administrator.
pub fn issue_token(
    subject: AdminId,
    role: AdminRole,
    secret: &SecretString,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject,
        role,
        iat: now.timestamp(),
        exp: (now + TOKEN_TTL).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose().as_bytes()),
    )
    .map_err(|e| AuthError::Sign(e.to_string()))
}

/// Verify a session token and return its claims.
///
/// Returns [`AuthError::InvalidToken`] for a bad signature, malformed
/// token, or expired token — indistinguishably, so the HTTP layer can
/// only ever answer with one generic 401.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    // No expiry leeway: an 8-hour token is rejected at 8 hours, not 8h01.
    validation.leeway = 0;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::new("test-signing-secret")
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let id = AdminId::new();
        let token = issue_token(id, AdminRole::Gestor, &secret()).unwrap();
        let claims = verify_token(&token, &secret()).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, AdminRole::Gestor);
    }

    #[test]
    fn expiry_is_eight_hours_after_issuance() {
        let token = issue_token(AdminId::new(), AdminRole::Admin, &secret()).unwrap();
        let claims = verify_token(&token, &secret()).unwrap();
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issue_token(AdminId::new(), AdminRole::Admin, &secret()).unwrap();
        let err = verify_token(&token, &SecretString::new("other-secret")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn malformed_token_rejected() {
        assert!(matches!(
            verify_token("not.a.jwt", &secret()),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            verify_token("", &secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_rejected() {
        // Hand-craft a token whose exp is already in the past.
        let now = Utc::now();
        let claims = Claims {
            sub: AdminId::new(),
            role: AdminRole::Gestor,
            iat: (now - Duration::hours(9)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose().as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            verify_token(&token, &secret()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn token_just_inside_ttl_accepted() {
        let now = Utc::now();
        let claims = Claims {
            sub: AdminId::new(),
            role: AdminRole::Gestor,
            iat: (now - Duration::hours(7)).timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose().as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, &secret()).is_ok());
    }
}
