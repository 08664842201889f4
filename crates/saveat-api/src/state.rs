//! # Application State
//!
//! Shared state for the Axum application: configuration, in-memory
//! stores, and the optional Postgres pool.
//!
//! ## Storage architecture
//!
//! The stores are the hot path — every request reads and writes them
//! under short `parking_lot` lock sections. When a database pool is
//! configured, mutations are additionally written through to Postgres
//! and the stores are hydrated from it at startup; when not, the service
//! runs in-memory only (development and tests).
//!
//! Cross-request invariants (email uniqueness, counter atomicity) are
//! enforced inside single lock acquisitions here, with the database's
//! own constraints as the durable backstop.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use sqlx::PgPool;
use thiserror::Error;

use saveat_auth::SecretString;
use saveat_core::{normalize_email, Admin, AdminId, Product, ProductId};

/// Service configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port (`PORT`, default 5000).
    pub port: u16,
    /// Token-signing secret (`JWT_SECRET`, required).
    pub jwt_secret: SecretString,
    /// Postgres connection string (`DATABASE_URL`, optional).
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is mandatory — refusing to start beats silently
    /// signing sessions with a known default.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT value {raw:?}: {e}"))?,
            Err(_) => {
                tracing::info!("PORT not set, using default: 5000");
                5000
            }
        };
        let jwt_secret = std::env::var("JWT_SECRET")
            .map(SecretString::new)
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let database_url = std::env::var("DATABASE_URL").ok();
        Ok(Self {
            port,
            jwt_secret,
            database_url,
        })
    }
}

/// Errors from store mutations that violate uniqueness invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another administrator already holds this email.
    #[error("email already registered")]
    DuplicateEmail,

    /// Another administrator already holds this employee id.
    #[error("employee id already assigned")]
    DuplicateEmployeeId,
}

/// In-memory administrator store. Uniqueness checks run inside the same
/// write-lock section as the mutation, so two racing registrations for
/// one email cannot both win.
#[derive(Debug, Clone, Default)]
pub struct AdminStore {
    inner: Arc<RwLock<HashMap<AdminId, Admin>>>,
}

impl AdminStore {
    /// Insert a new administrator, enforcing email and employee-id
    /// uniqueness atomically.
    pub fn insert(&self, admin: Admin) -> Result<(), StoreError> {
        let mut map = self.inner.write();
        if map
            .values()
            .any(|a| a.email == admin.email && a.id != admin.id)
        {
            return Err(StoreError::DuplicateEmail);
        }
        if let Some(emp) = &admin.employee_id {
            if map
                .values()
                .any(|a| a.employee_id.as_ref() == Some(emp) && a.id != admin.id)
            {
                return Err(StoreError::DuplicateEmployeeId);
            }
        }
        map.insert(admin.id, admin);
        Ok(())
    }

    /// Replace an existing administrator record, re-enforcing uniqueness
    /// against all other records. Returns `false` if the id is gone.
    pub fn update(&self, admin: Admin) -> Result<bool, StoreError> {
        let mut map = self.inner.write();
        if !map.contains_key(&admin.id) {
            return Ok(false);
        }
        if map
            .values()
            .any(|a| a.id != admin.id && a.email == admin.email)
        {
            return Err(StoreError::DuplicateEmail);
        }
        if let Some(emp) = &admin.employee_id {
            if map
                .values()
                .any(|a| a.id != admin.id && a.employee_id.as_ref() == Some(emp))
            {
                return Err(StoreError::DuplicateEmployeeId);
            }
        }
        map.insert(admin.id, admin);
        Ok(true)
    }

    /// Fetch an administrator by id.
    pub fn get(&self, id: AdminId) -> Option<Admin> {
        self.inner.read().get(&id).cloned()
    }

    /// Look up an administrator by email. The argument is normalized
    /// before comparison.
    pub fn find_by_email(&self, email: &str) -> Option<Admin> {
        let wanted = normalize_email(email);
        self.inner.read().values().find(|a| a.email == wanted).cloned()
    }

    /// Whether an email is already held by an administrator other than
    /// `exclude`. Used as the registration/update pre-check.
    pub fn email_taken(&self, email: &str, exclude: Option<AdminId>) -> bool {
        let wanted = normalize_email(email);
        self.inner
            .read()
            .values()
            .any(|a| a.email == wanted && Some(a.id) != exclude)
    }

    /// Bulk-load records during startup hydration.
    pub fn load(&self, admins: Vec<Admin>) {
        let mut map = self.inner.write();
        for admin in admins {
            map.insert(admin.id, admin);
        }
    }

    /// Number of stored administrators.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store holds no administrators.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// In-memory product store.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    inner: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl ProductStore {
    /// Insert a new product.
    pub fn insert(&self, product: Product) {
        self.inner.write().insert(product.id, product);
    }

    /// Replace an existing product. Returns `false` if the id is gone.
    pub fn update(&self, product: Product) -> bool {
        let mut map = self.inner.write();
        if !map.contains_key(&product.id) {
            return false;
        }
        map.insert(product.id, product);
        true
    }

    /// Fetch a product by id.
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.inner.read().get(&id).cloned()
    }

    /// Remove a product. Returns `false` if the id did not exist.
    pub fn remove(&self, id: ProductId) -> bool {
        self.inner.write().remove(&id).is_some()
    }

    /// All products, most recently created first (the admin panel view).
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.inner.read().values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }

    /// Bulk-load records during startup hydration.
    pub fn load(&self, products: Vec<Product>) {
        let mut map = self.inner.write();
        for product in products {
            map.insert(product.id, product);
        }
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store holds no products.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// In-memory named sequence counters.
///
/// `next` is one atomic find-or-create-increment: the lookup, the
/// increment, and the read-back all happen under a single lock
/// acquisition, so concurrent callers for the same name observe distinct
/// consecutive values with no duplicates and no gaps.
#[derive(Debug, Clone, Default)]
pub struct CounterStore {
    inner: Arc<Mutex<HashMap<String, i64>>>,
}

impl CounterStore {
    /// Increment the named counter (creating it at 0 first if absent)
    /// and return the post-increment value.
    pub fn next(&self, name: &str) -> i64 {
        let mut map = self.inner.lock();
        let seq = map.entry(name.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Current value of a counter, if it exists. Diagnostic only.
    pub fn current(&self, name: &str) -> Option<i64> {
        self.inner.lock().get(name).copied()
    }

    /// Bulk-load counter values during startup hydration.
    pub fn load(&self, counters: Vec<(String, i64)>) {
        let mut map = self.inner.lock();
        for (name, seq) in counters {
            map.insert(name, seq);
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub admins: AdminStore,
    pub products: ProductStore,
    pub counters: CounterStore,
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// State with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            config: Arc::new(config),
            admins: AdminStore::default(),
            products: ProductStore::default(),
            counters: CounterStore::default(),
            db_pool,
        }
    }

    /// In-memory state with a throwaway signing secret. For tests and
    /// local experiments only.
    pub fn new_in_memory(jwt_secret: &str) -> Self {
        Self::with_config(
            AppConfig {
                port: 0,
                jwt_secret: SecretString::new(jwt_secret),
                database_url: None,
            },
            None,
        )
    }

    /// Next value of a named sequence counter.
    ///
    /// With a database configured the increment happens in a single
    /// atomic upsert statement in Postgres and the in-memory counter is
    /// synced to the result; without one, the in-memory counter is
    /// authoritative.
    pub async fn next_sequence(&self, name: &str) -> Result<i64, sqlx::Error> {
        match &self.db_pool {
            Some(pool) => {
                let seq = crate::db::counters::next_sequence(pool, name).await?;
                self.counters.load(vec![(name.to_string(), seq)]);
                Ok(seq)
            }
            None => Ok(self.counters.next(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use saveat_core::AdminRole;

    fn admin_with_email(email: &str) -> Admin {
        let now = Utc::now();
        Admin {
            id: AdminId::new(),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            email: normalize_email(email),
            password_hash: "hash".to_string(),
            role: AdminRole::Gestor,
            phone: None,
            employee_id: None,
            country: None,
            city: None,
            postal_code: None,
            social_media: None,
            profile_picture_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn duplicate_email_insert_rejected() {
        let store = AdminStore::default();
        store.insert(admin_with_email("a@b.c")).unwrap();
        let err = store.insert(admin_with_email("a@b.c")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn email_taken_respects_exclusion() {
        let store = AdminStore::default();
        let admin = admin_with_email("a@b.c");
        let id = admin.id;
        store.insert(admin).unwrap();
        assert!(store.email_taken("A@B.C", None));
        assert!(!store.email_taken("a@b.c", Some(id)));
    }

    #[test]
    fn find_by_email_normalizes() {
        let store = AdminStore::default();
        store.insert(admin_with_email("Ana@Saveat.org")).unwrap();
        assert!(store.find_by_email("  ANA@saveat.ORG ").is_some());
    }

    #[test]
    fn update_missing_admin_returns_false() {
        let store = AdminStore::default();
        assert_eq!(store.update(admin_with_email("a@b.c")), Ok(false));
    }

    #[test]
    fn update_cannot_steal_email() {
        let store = AdminStore::default();
        store.insert(admin_with_email("first@b.c")).unwrap();
        let second = admin_with_email("second@b.c");
        let mut stolen = second.clone();
        store.insert(second).unwrap();
        stolen.email = "first@b.c".to_string();
        assert_eq!(store.update(stolen), Err(StoreError::DuplicateEmail));
    }

    #[test]
    fn duplicate_employee_id_rejected() {
        let store = AdminStore::default();
        let mut first = admin_with_email("a@b.c");
        first.employee_id = Some("EMP-1".to_string());
        store.insert(first).unwrap();
        let mut second = admin_with_email("x@y.z");
        second.employee_id = Some("EMP-1".to_string());
        assert_eq!(
            store.insert(second),
            Err(StoreError::DuplicateEmployeeId)
        );
    }

    #[test]
    fn counter_starts_at_one_and_increments() {
        let counters = CounterStore::default();
        assert_eq!(counters.next("employee_id"), 1);
        assert_eq!(counters.next("employee_id"), 2);
        assert_eq!(counters.next("other"), 1);
        assert_eq!(counters.current("employee_id"), Some(2));
        assert_eq!(counters.current("missing"), None);
    }

    #[test]
    fn concurrent_counter_values_are_distinct_and_gapless() {
        let counters = CounterStore::default();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counters = counters.clone();
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| counters.next("race")).collect::<Vec<_>>()
            }));
        }
        let mut seen: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        seen.sort_unstable();
        let expected: Vec<i64> = (1..=800).collect();
        assert_eq!(seen, expected);
    }
}
