//! # OpenAPI Document
//!
//! Auto-generated OpenAPI spec from handler annotations, served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// OpenAPI document for the Saveat API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Saveat API",
        description = "Admin authentication and product-inventory CRUD for the Saveat donation platform.",
    ),
    paths(
        crate::routes::admins::register,
        crate::routes::admins::login,
        crate::routes::admins::get_profile,
        crate::routes::admins::update_profile,
        crate::routes::products::create_product,
        crate::routes::products::list_products_admin,
        crate::routes::products::get_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::admins::RegisterRequest,
        crate::routes::admins::LoginRequest,
        crate::routes::admins::AuthResponse,
        crate::routes::admins::UpdateProfileRequest,
        crate::routes::products::CreateProductRequest,
        crate::routes::products::UpdateProductRequest,
        crate::routes::products::DeleteResponse,
        saveat_core::AdminId,
        saveat_core::AdminPublic,
        saveat_core::AdminRole,
        saveat_core::SocialMedia,
        saveat_core::Product,
        saveat_core::ProductId,
        saveat_core::ProductStatus,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "admins", description = "Administrator registration, login, profile"),
        (name = "products", description = "Donated-goods catalog CRUD"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme referenced by the
/// `security(("bearer_token" = []))` path annotations.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// GET /openapi.json — the generated spec.
async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_all_routes() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/admins/register"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/admins/login"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/admins/profile"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/products"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/products/admin"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/products/{id}"));
    }

    #[test]
    fn spec_registers_bearer_scheme() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_token"));
    }
}
