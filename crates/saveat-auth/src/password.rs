//! # Password Hashing
//!
//! bcrypt hashing and verification. Each hash uses a fresh random salt
//! baked into the bcrypt output string, so hashing is non-deterministic
//! and verification is only possible through [`verify_password`].

use crate::error::AuthError;

/// bcrypt cost factor. 2^10 rounds — the service's historical work factor.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a fresh per-call salt.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Compare a plaintext password against a stored bcrypt hash.
///
/// Fails closed: any internal bcrypt error (malformed hash, unsupported
/// version) is treated as a non-match, not propagated.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(plaintext, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "bcrypt verification error, treating as non-match");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let h1 = hash_password("same password").unwrap();
        let h2 = hash_password("same password").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("same password", &h1));
        assert!(verify_password("same password", &h2));
    }

    #[test]
    fn verify_fails_closed_on_garbage_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn hash_uses_configured_cost() {
        let hash = hash_password("pw").unwrap();
        // bcrypt output embeds the cost: $2b$10$...
        assert!(hash.contains("$10$"), "unexpected hash format: {hash}");
    }
}
