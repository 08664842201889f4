//! # Product Catalog API
//!
//! CRUD for donated-goods catalog entries, serving the admin panel.
//! Every operation requires an authenticated session; deletion
//! additionally requires the `admin` role.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use saveat_core::{Product, ProductId, ProductStatus};

use crate::auth::{AdminOnly, CurrentAdmin};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to create a catalog product.
///
/// Required-field enforcement is the deserializer's job: a payload
/// missing `expiry_date` (or any other non-defaulted field) is rejected
/// as a 400 with the deserializer's detail before this type exists.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub quantity_available: i64,
    pub quantity_total_received: i64,
    pub unit: String,
    #[serde(default)]
    pub price: f64,
    pub payment_link: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    pub donor_id: Uuid,
    /// Defaults to now when omitted.
    pub received_at: Option<DateTime<Utc>>,
    pub expiry_date: DateTime<Utc>,
    pub pickup_window_hours: i32,
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.unit.trim().is_empty() {
            return Err("unit must not be empty".to_string());
        }
        if self.quantity_available < 0 {
            return Err("quantity_available must not be negative".to_string());
        }
        if self.quantity_total_received < 0 {
            return Err("quantity_total_received must not be negative".to_string());
        }
        if self.pickup_window_hours < 0 {
            return Err("pickup_window_hours must not be negative".to_string());
        }
        Ok(())
    }
}

/// Partial product update. Omitted fields are left unchanged; the
/// merged record is re-validated before anything is stored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub quantity_available: Option<i64>,
    pub quantity_total_received: Option<i64>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub payment_link: Option<String>,
    pub status: Option<ProductStatus>,
    pub donor_id: Option<Uuid>,
    pub received_at: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub pickup_window_hours: Option<i32>,
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> Result<(), String> {
        // Field constraints are re-checked on the merged record; only
        // shape problems are caught here.
        Ok(())
    }
}

/// Delete confirmation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub id: ProductId,
    pub deleted: bool,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/products",
            axum::routing::post(create_product),
        )
        .route("/api/v1/products/admin", get(list_products_admin))
        .route(
            "/api/v1/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// POST /api/v1/products — Create a catalog product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    _caller: CurrentAdmin,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();

    let product = Product {
        id: ProductId::new(),
        name: req.name.trim().to_string(),
        description: req.description,
        image_url: req.image_url,
        brand: req.brand,
        category: req.category,
        quantity_available: req.quantity_available,
        quantity_total_received: req.quantity_total_received,
        unit: req.unit,
        price: req.price,
        payment_link: req.payment_link,
        status: req.status,
        donor_id: req.donor_id,
        received_at: req.received_at.unwrap_or(now),
        expiry_date: req.expiry_date,
        pickup_window_hours: req.pickup_window_hours,
        created_at: now,
        updated_at: now,
    };

    state.products.insert(product.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::products::insert(pool, &product).await {
            tracing::error!(product_id = %product.id, error = %e, "failed to persist product to database");
            return Err(AppError::Internal(
                "product recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    tracing::info!(product_id = %product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products/admin — All products, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/products/admin",
    responses(
        (status = 200, description = "All products, newest first", body = [Product]),
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub(crate) async fn list_products_admin(
    State(state): State<AppState>,
    _caller: CurrentAdmin,
) -> Json<Vec<Product>> {
    Json(state.products.list())
}

/// GET /api/v1/products/:id — Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "No product with this id", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    _caller: CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    state
        .products
        .get(ProductId::from_uuid(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))
}

/// PUT /api/v1/products/:id — Update a product (full or partial).
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
        (status = 404, description = "No product with this id", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub(crate) async fn update_product(
    State(state): State<AppState>,
    _caller: CurrentAdmin,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let req = extract_validated_json(body)?;

    let mut product = state
        .products
        .get(ProductId::from_uuid(id))
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))?;

    if let Some(name) = req.name {
        product.name = name;
    }
    if let Some(description) = req.description {
        product.description = Some(description);
    }
    if let Some(image_url) = req.image_url {
        product.image_url = Some(image_url);
    }
    if let Some(brand) = req.brand {
        product.brand = Some(brand);
    }
    if let Some(category) = req.category {
        product.category = Some(category);
    }
    if let Some(quantity_available) = req.quantity_available {
        product.quantity_available = quantity_available;
    }
    if let Some(quantity_total_received) = req.quantity_total_received {
        product.quantity_total_received = quantity_total_received;
    }
    if let Some(unit) = req.unit {
        product.unit = unit;
    }
    if let Some(price) = req.price {
        product.price = price;
    }
    if let Some(payment_link) = req.payment_link {
        product.payment_link = Some(payment_link);
    }
    if let Some(status) = req.status {
        product.status = status;
    }
    if let Some(donor_id) = req.donor_id {
        product.donor_id = donor_id;
    }
    if let Some(received_at) = req.received_at {
        product.received_at = received_at;
    }
    if let Some(expiry_date) = req.expiry_date {
        product.expiry_date = expiry_date;
    }
    if let Some(pickup_window_hours) = req.pickup_window_hours {
        product.pickup_window_hours = pickup_window_hours;
    }
    product.updated_at = Utc::now();

    // Re-validate the merged record; a partial update can never leave an
    // invalid product behind.
    product.validate()?;

    if !state.products.update(product.clone()) {
        return Err(AppError::NotFound("product not found".to_string()));
    }

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::products::update(pool, &product).await {
            tracing::error!(product_id = %product.id, error = %e, "failed to persist product update to database");
            return Err(AppError::Internal(
                "product updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(product))
}

/// DELETE /api/v1/products/:id — Remove a product. Requires `admin` role.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 403, description = "Caller lacks the admin role", body = crate::error::ErrorBody),
        (status = 404, description = "No product with this id", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub(crate) async fn delete_product(
    State(state): State<AppState>,
    AdminOnly(caller): AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = ProductId::from_uuid(id);

    if !state.products.remove(id) {
        return Err(AppError::NotFound("product not found".to_string()));
    }

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::products::delete(pool, id).await {
            tracing::error!(product_id = %id, error = %e, "failed to delete product from database");
            return Err(AppError::Internal(
                "product removed in-memory but database delete failed".to_string(),
            ));
        }
    }

    tracing::info!(product_id = %id, admin_id = %caller.id, "product deleted");

    Ok(Json(DeleteResponse { id, deleted: true }))
}
