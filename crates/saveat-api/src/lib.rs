//! # Saveat API
//!
//! REST backend for the Saveat donation platform: administrator
//! authentication (register, login, own profile) and CRUD for the
//! donated-goods product catalog, plus liveness/readiness probes and a
//! generated OpenAPI document.
//!
//! ## API surface
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/api/v1` | none |
//! | POST | `/api/v1/admins/register` | none |
//! | POST | `/api/v1/admins/login` | none |
//! | GET | `/api/v1/admins/profile` | bearer token |
//! | PUT | `/api/v1/admins/profile` | bearer token |
//! | POST | `/api/v1/products` | bearer token |
//! | GET | `/api/v1/products/admin` | bearer token |
//! | GET | `/api/v1/products/:id` | bearer token |
//! | PUT | `/api/v1/products/:id` | bearer token |
//! | DELETE | `/api/v1/products/:id` | bearer token + `admin` role |
//! | GET | `/health/liveness` | none |
//! | GET | `/health/readiness` | none |
//! | GET | `/openapi.json` | none |
//!
//! Protected routes declare authentication as an extractor parameter
//! ([`auth::CurrentAdmin`] or [`auth::AdminOnly`]), so the resolved
//! identity reaches the handler as an explicit value.

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Maximum accepted request body, in bytes.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(greeting))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::admins::router())
        .merge(routes::products::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/v1 — greeting for humans poking at the base path.
async fn greeting() -> &'static str {
    "API de Saveat v1"
}

/// GET /health/liveness — the process is up and serving.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness — the service can do useful work. With a
/// database configured this round-trips a `SELECT 1`; without one the
/// in-memory stores are always ready.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, (StatusCode, &'static str)> {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!(error = %e, "readiness check failed");
            return Err((StatusCode::SERVICE_UNAVAILABLE, "database unreachable"));
        }
    }
    Ok("ready")
}
