//! Administrator persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `admins` table.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use chrono::{DateTime, Utc};
use saveat_core::{Admin, AdminId, AdminRole, SocialMedia};

/// Insert a new administrator record.
pub async fn insert(pool: &PgPool, admin: &Admin) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO admins (id, first_name, last_name, email, password_hash, role,
         phone, employee_id, country, city, postal_code, social_media,
         profile_picture_url, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
    )
    .bind(admin.id.as_uuid())
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(admin.role.as_str())
    .bind(&admin.phone)
    .bind(&admin.employee_id)
    .bind(&admin.country)
    .bind(&admin.city)
    .bind(&admin.postal_code)
    .bind(admin.social_media.clone().map(Json))
    .bind(&admin.profile_picture_url)
    .bind(admin.created_at)
    .bind(admin.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace an administrator record. Returns `false` if the id is gone.
pub async fn update(pool: &PgPool, admin: &Admin) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE admins SET first_name = $1, last_name = $2, email = $3,
         password_hash = $4, role = $5, phone = $6, employee_id = $7,
         country = $8, city = $9, postal_code = $10, social_media = $11,
         profile_picture_url = $12, updated_at = $13
         WHERE id = $14",
    )
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(admin.role.as_str())
    .bind(&admin.phone)
    .bind(&admin.employee_id)
    .bind(&admin.country)
    .bind(&admin.city)
    .bind(&admin.postal_code)
    .bind(admin.social_media.clone().map(Json))
    .bind(&admin.profile_picture_url)
    .bind(admin.updated_at)
    .bind(admin.id.as_uuid())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all administrator records for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AdminRow>(
        "SELECT id, first_name, last_name, email, password_hash, role, phone,
         employee_id, country, city, postal_code, social_media,
         profile_picture_url, created_at, updated_at
         FROM admins ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_record() {
            Some(record) => records.push(record),
            None => {
                tracing::error!("skipping admin row with invalid role during load_all");
            }
        }
    }
    Ok(records)
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
    phone: Option<String>,
    employee_id: Option<String>,
    country: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    social_media: Option<Json<SocialMedia>>,
    profile_picture_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_record(self) -> Option<Admin> {
        let role: AdminRole = match self.role.parse() {
            Ok(role) => role,
            Err(_) => {
                tracing::warn!(id = %self.id, role = %self.role, "invalid role in admins row");
                return None;
            }
        };
        Some(Admin {
            id: AdminId::from_uuid(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            role,
            phone: self.phone,
            employee_id: self.employee_id,
            country: self.country,
            city: self.city,
            postal_code: self.postal_code,
            social_media: self.social_media.map(|Json(links)| links),
            profile_picture_url: self.profile_picture_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
