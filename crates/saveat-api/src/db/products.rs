//! Product catalog persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `products` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use saveat_core::{Product, ProductId, ProductStatus};

/// Insert a new product record.
pub async fn insert(pool: &PgPool, product: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO products (id, name, description, image_url, brand, category,
         quantity_available, quantity_total_received, unit, price, payment_link,
         status, donor_id, received_at, expiry_date, pickup_window_hours,
         created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                 $15, $16, $17, $18)",
    )
    .bind(product.id.as_uuid())
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.image_url)
    .bind(&product.brand)
    .bind(&product.category)
    .bind(product.quantity_available)
    .bind(product.quantity_total_received)
    .bind(&product.unit)
    .bind(product.price)
    .bind(&product.payment_link)
    .bind(product.status.as_str())
    .bind(product.donor_id)
    .bind(product.received_at)
    .bind(product.expiry_date)
    .bind(product.pickup_window_hours)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace a product record. Returns `false` if the id is gone.
pub async fn update(pool: &PgPool, product: &Product) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE products SET name = $1, description = $2, image_url = $3,
         brand = $4, category = $5, quantity_available = $6,
         quantity_total_received = $7, unit = $8, price = $9, payment_link = $10,
         status = $11, donor_id = $12, received_at = $13, expiry_date = $14,
         pickup_window_hours = $15, updated_at = $16
         WHERE id = $17",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.image_url)
    .bind(&product.brand)
    .bind(&product.category)
    .bind(product.quantity_available)
    .bind(product.quantity_total_received)
    .bind(&product.unit)
    .bind(product.price)
    .bind(&product.payment_link)
    .bind(product.status.as_str())
    .bind(product.donor_id)
    .bind(product.received_at)
    .bind(product.expiry_date)
    .bind(product.pickup_window_hours)
    .bind(product.updated_at)
    .bind(product.id.as_uuid())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a product record. Returns `false` if the id did not exist.
pub async fn delete(pool: &PgPool, id: ProductId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id.as_uuid())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all product records for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, description, image_url, brand, category,
         quantity_available, quantity_total_received, unit, price, payment_link,
         status, donor_id, received_at, expiry_date, pickup_window_hours,
         created_at, updated_at
         FROM products ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_record() {
            Some(record) => records.push(record),
            None => {
                tracing::error!("skipping product row with invalid status during load_all");
            }
        }
    }
    Ok(records)
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    quantity_available: i64,
    quantity_total_received: i64,
    unit: String,
    price: f64,
    payment_link: Option<String>,
    status: String,
    donor_id: Uuid,
    received_at: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    pickup_window_hours: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_record(self) -> Option<Product> {
        let status: ProductStatus = match self.status.parse() {
            Ok(status) => status,
            Err(_) => {
                tracing::warn!(id = %self.id, status = %self.status, "invalid status in products row");
                return None;
            }
        };
        Some(Product {
            id: ProductId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            brand: self.brand,
            category: self.category,
            quantity_available: self.quantity_available,
            quantity_total_received: self.quantity_total_received,
            unit: self.unit,
            price: self.price,
            payment_link: self.payment_link,
            status,
            donor_id: self.donor_id,
            received_at: self.received_at,
            expiry_date: self.expiry_date,
            pickup_window_hours: self.pickup_window_hours,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
