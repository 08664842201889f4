//! # saveat-core — Domain Types
//!
//! Shared domain model for the Saveat donation backend:
//!
//! - [`admin`] — administrator records, roles, and the public projection
//!   that strips credential material before anything leaves the service.
//! - [`product`] — donated-goods catalog records and their status lifecycle.
//! - [`error`] — domain validation errors.
//!
//! ## Crate Policy
//!
//! - Leaf crate: no I/O, no framework types, no async.
//! - Identifiers are distinct newtypes — an [`AdminId`] is never
//!   interchangeable with a [`ProductId`].
//! - Wire names (field names and enum strings) are the service's public
//!   contract and must not drift.

pub mod admin;
pub mod error;
pub mod product;

pub use admin::{normalize_email, Admin, AdminId, AdminPublic, AdminRole, SocialMedia};
pub use error::ValidationError;
pub use product::{Product, ProductId, ProductStatus};
