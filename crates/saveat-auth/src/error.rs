//! # Authentication Error Types
//!
//! Structured errors for credential operations in `saveat-auth`.

use thiserror::Error;

/// Errors from credential operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token signature invalid, token malformed, or token expired.
    ///
    /// One variant for all three on purpose: callers map this to a single
    /// generic 401 and must not be able to distinguish the cause.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Password hashing failed (bcrypt internal error).
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Token signing failed (key or encoding error).
    #[error("token signing failed: {0}")]
    Sign(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_display_is_generic() {
        let msg = format!("{}", AuthError::InvalidToken);
        assert_eq!(msg, "invalid or expired token");
    }

    #[test]
    fn hash_error_display() {
        let err = AuthError::Hash("cost out of range".to_string());
        assert!(format!("{err}").contains("cost out of range"));
    }

    #[test]
    fn sign_error_display() {
        let err = AuthError::Sign("bad key".to_string());
        assert!(format!("{err}").contains("bad key"));
    }
}
