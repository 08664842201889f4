//! # Signing Secret Wrapper
//!
//! [`SecretString`] holds the process-wide token-signing secret. The
//! inner bytes are zeroized on drop and the `Debug` impl redacts, so the
//! secret cannot leak through logs or panic messages.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string that zeroizes its memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret for signing/verification. Keep the borrow short.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expose_returns_inner_value() {
        let secret = SecretString::new("s3cret");
        assert_eq!(secret.expose(), "s3cret");
    }

    #[test]
    fn debug_redacts() {
        let secret = SecretString::new("s3cret");
        let dbg = format!("{secret:?}");
        assert!(!dbg.contains("s3cret"));
        assert_eq!(dbg, "SecretString(..)");
    }
}
