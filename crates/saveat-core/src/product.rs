//! # Product Catalog Records
//!
//! Donated-goods catalog entries and their status lifecycle.
//!
//! A product starts as a draft (`borrador`), is published as available
//! (`disponible`), and ends sold out (`agotado`). Quantities are tracked
//! as received-total and currently-available; `quantity_available` is
//! never negative by validation (not enforced transactionally against
//! concurrent decrements — spec'd behavior of the storage layer).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;

/// A unique identifier for a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Create a new random product identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a product identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Product publication status. Wire values are the Spanish-facing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Published and claimable.
    Disponible,
    /// Draft — visible only in the admin panel. The default for new entries.
    #[default]
    Borrador,
    /// Sold out / fully claimed.
    Agotado,
}

impl ProductStatus {
    /// Wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disponible => "disponible",
            Self::Borrador => "borrador",
            Self::Agotado => "agotado",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disponible" => Ok(Self::Disponible),
            "borrador" => Ok(Self::Borrador),
            "agotado" => Ok(Self::Agotado),
            other => Err(ValidationError::InvalidValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// A persisted catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity_available: i64,
    pub quantity_total_received: i64,
    pub unit: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    pub status: ProductStatus,
    /// Foreign reference to the donor aggregate (not modeled here).
    pub donor_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub pickup_window_hours: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Validate the record's field constraints.
    ///
    /// Required strings must be non-empty after trimming; quantities and
    /// the pickup window must not be negative. Runs both on creation and
    /// after applying an update, so a partial update can never leave a
    /// record in an invalid state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::MissingField("unit"));
        }
        if self.quantity_available < 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity_available",
                reason: "must not be negative".to_string(),
            });
        }
        if self.quantity_total_received < 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity_total_received",
                reason: "must not be negative".to_string(),
            });
        }
        if self.pickup_window_hours < 0 {
            return Err(ValidationError::OutOfRange {
                field: "pickup_window_hours",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
