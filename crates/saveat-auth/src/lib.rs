//! # saveat-auth — Credential Primitives
//!
//! Password hashing and session-token issuance for the Saveat backend.
//!
//! - [`password`] — bcrypt hashing with a fresh per-call salt, and
//!   fail-closed verification.
//! - [`token`] — HS256 JWT issuance and verification with an 8-hour
//!   expiry, carrying the administrator id and role as claims.
//! - [`secret`] — [`SecretString`], a zeroizing wrapper for the
//!   process-wide signing secret.
//!
//! ## Crate Policy
//!
//! - Owns every touch of credential material. Handlers call
//!   [`hash_password`] explicitly when a password is set or changed —
//!   there is no implicit persistence hook.
//! - [`verify_password`] returns `false` on any internal error rather
//!   than propagating it; a caller can never be tricked into treating a
//!   hashing failure as a match.

pub mod error;
pub mod password;
pub mod secret;
pub mod token;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use secret::SecretString;
pub use token::{issue_token, verify_token, Claims, TOKEN_TTL};
