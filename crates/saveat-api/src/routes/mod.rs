//! # API Route Modules
//!
//! Route modules for the Saveat API surface, mounted under `/api/v1`:
//!
//! - `admins` — registration, login, and own-profile read/update.
//! - `products` — donated-goods catalog CRUD for the admin panel.

pub mod admins;
pub mod products;
