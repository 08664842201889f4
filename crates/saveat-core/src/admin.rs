//! # Administrator Records
//!
//! The administrator aggregate: identity newtype, role enum, profile
//! fields, and the public projection returned by the API.
//!
//! ## Security Invariant
//!
//! [`Admin`] carries the bcrypt `password_hash` and therefore never
//! crosses the HTTP boundary. Every response uses [`AdminPublic`], which
//! has no hash field at all — omission by construction, not by
//! serializer flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A unique identifier for an administrator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct AdminId(Uuid);

impl AdminId {
    /// Create a new random administrator identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an administrator identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AdminId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AdminId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AdminId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AdminId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Administrator role. Gates the destructive product operations.
///
/// Wire values are the service's Spanish-facing contract: `admin`
/// holds full rights, `gestor` (the default) manages inventory but
/// cannot delete products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    #[default]
    Gestor,
}

impl AdminRole {
    /// Wire string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Gestor => "gestor",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "gestor" => Ok(Self::Gestor),
            other => Err(crate::error::ValidationError::InvalidValue {
                field: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// Optional social-media links on an administrator profile.
///
/// Updated per-subfield: a profile update that sends only `facebook`
/// leaves the other links untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialMedia {
    /// Merge another set of links into this one, subfield by subfield.
    /// `None` fields in `other` leave the existing value in place.
    pub fn merge(&mut self, other: &SocialMedia) {
        if let Some(v) = &other.facebook {
            self.facebook = Some(v.clone());
        }
        if let Some(v) = &other.x {
            self.x = Some(v.clone());
        }
        if let Some(v) = &other.linkedin {
            self.linkedin = Some(v.clone());
        }
        if let Some(v) = &other.instagram {
            self.instagram = Some(v.clone());
        }
    }
}

/// A persisted administrator record, including the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub first_name: String,
    pub last_name: String,
    /// Always stored normalized — lowercase, trimmed. Unique.
    pub email: String,
    /// bcrypt hash. Never serialized out of the service; see [`AdminPublic`].
    pub password_hash: String,
    pub role: AdminRole,
    pub phone: Option<String>,
    /// Unique when present, absent otherwise.
    pub employee_id: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of an [`Admin`] — everything except the hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminPublic {
    pub id: AdminId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: AdminRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Admin> for AdminPublic {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            email: admin.email.clone(),
            role: admin.role,
            phone: admin.phone.clone(),
            employee_id: admin.employee_id.clone(),
            country: admin.country.clone(),
            city: admin.city.clone(),
            postal_code: admin.postal_code.clone(),
            social_media: admin.social_media.clone(),
            profile_picture_url: admin.profile_picture_url.clone(),
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

impl From<Admin> for AdminPublic {
    fn from(admin: Admin) -> Self {
        Self::from(&admin)
    }
}

/// Normalize an email for storage and lookup: trimmed, lowercased.
///
/// Email uniqueness is case-insensitive; every comparison goes through
/// this normalization first.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
