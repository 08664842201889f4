//! # Administrator API
//!
//! Registration, login, and own-profile endpoints.
//!
//! Register and login both answer with a session token plus the public
//! projection of the account. Login failure is a single generic 401
//! whether the email is unknown or the password is wrong — account
//! enumeration through error messages is not possible.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use saveat_auth::{hash_password, issue_token, verify_password};
use saveat_core::{normalize_email, Admin, AdminId, AdminPublic, AdminRole, SocialMedia};

use crate::auth::CurrentAdmin;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to register a new administrator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext, hashed before anything is stored.
    pub password: String,
    /// Defaults to `gestor` when omitted.
    #[serde(default)]
    pub role: AdminRole,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("first_name must not be empty".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name must not be empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

/// Successful register/login response: a session token and the public
/// projection of the account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub admin: AdminPublic,
}

/// Partial profile update. Omitted fields are left unchanged; the
/// social-media object is merged per-subfield, not replaced wholesale.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// New plaintext password; re-hashed here, explicitly, only when set.
    pub password: Option<String>,
    pub phone: Option<String>,
    pub employee_id: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub profile_picture_url: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), String> {
        if matches!(&self.email, Some(e) if e.trim().is_empty()) {
            return Err("email must not be empty".to_string());
        }
        if matches!(&self.first_name, Some(n) if n.trim().is_empty()) {
            return Err("first_name must not be empty".to_string());
        }
        if matches!(&self.last_name, Some(n) if n.trim().is_empty()) {
            return Err("last_name must not be empty".to_string());
        }
        if matches!(&self.password, Some(p) if p.is_empty()) {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the administrators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admins/register", post(register))
        .route("/api/v1/admins/login", post(login))
        .route(
            "/api/v1/admins/profile",
            get(get_profile).put(update_profile),
        )
}

/// POST /api/v1/admins/register — Create an administrator account.
#[utoipa::path(
    post,
    path = "/api/v1/admins/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Administrator registered", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered", body = crate::error::ErrorBody),
    ),
    tag = "admins"
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let email = normalize_email(&req.email);

    // Pre-check for a friendly message; the store insert below is the
    // authoritative guard if two registrations race on the same email.
    if state.admins.email_taken(&email, None) {
        return Err(AppError::validation("email already registered"));
    }

    let password_hash =
        hash_password(&req.password).map_err(|e| AppError::Internal(e.to_string()))?;

    let now = Utc::now();
    let admin = Admin {
        id: AdminId::new(),
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        email,
        password_hash,
        role: req.role,
        phone: None,
        employee_id: None,
        country: None,
        city: None,
        postal_code: None,
        social_media: None,
        profile_picture_url: None,
        created_at: now,
        updated_at: now,
    };

    state.admins.insert(admin.clone())?;

    // Persist to database (write-through). Failure is surfaced because an
    // in-memory-only account would silently vanish on restart.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::admins::insert(pool, &admin).await {
            tracing::error!(admin_id = %admin.id, error = %e, "failed to persist admin to database");
            return Err(AppError::Internal(
                "admin recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    let token = issue_token(admin.id, admin.role, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(admin_id = %admin.id, role = %admin.role, "administrator registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            admin: AdminPublic::from(&admin),
        }),
    ))
}

/// POST /api/v1/admins/login — Authenticate an administrator.
#[utoipa::path(
    post,
    path = "/api/v1/admins/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    tag = "admins"
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let req = extract_validated_json(body)?;

    // Unknown email and wrong password take the same path to the same
    // generic answer.
    let admin = state.admins.find_by_email(&req.email);
    let credentials_ok = admin
        .as_ref()
        .map(|a| verify_password(&req.password, &a.password_hash))
        .unwrap_or(false);
    let Some(admin) = admin.filter(|_| credentials_ok) else {
        return Err(AppError::Unauthorized("invalid email or password".to_string()));
    };

    let token = issue_token(admin.id, admin.role, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(admin_id = %admin.id, "administrator logged in");

    Ok(Json(AuthResponse {
        token,
        admin: AdminPublic::from(&admin),
    }))
}

/// GET /api/v1/admins/profile — Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/admins/profile",
    responses(
        (status = 200, description = "Caller's profile", body = AdminPublic),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "admins"
)]
pub(crate) async fn get_profile(CurrentAdmin(admin): CurrentAdmin) -> Json<AdminPublic> {
    Json(admin)
}

/// PUT /api/v1/admins/profile — Partially update the caller's profile.
#[utoipa::path(
    put,
    path = "/api/v1/admins/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = AdminPublic),
        (status = 400, description = "Email already registered by another account", body = crate::error::ErrorBody),
        (status = 404, description = "Account no longer exists", body = crate::error::ErrorBody),
    ),
    security(("bearer_token" = [])),
    tag = "admins"
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    CurrentAdmin(caller): CurrentAdmin,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<AdminPublic>, AppError> {
    let req = extract_validated_json(body)?;

    // Re-fetch the full record; the account may have vanished between
    // token verification and now.
    let mut admin = state
        .admins
        .get(caller.id)
        .ok_or_else(|| AppError::NotFound("admin not found".to_string()))?;

    if let Some(email) = &req.email {
        let email = normalize_email(email);
        if email != admin.email && state.admins.email_taken(&email, Some(admin.id)) {
            return Err(AppError::validation("email already registered"));
        }
        admin.email = email;
    }
    if let Some(first_name) = req.first_name {
        admin.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = req.last_name {
        admin.last_name = last_name.trim().to_string();
    }
    if let Some(password) = &req.password {
        // Explicit re-hash on password change; untouched otherwise.
        admin.password_hash =
            hash_password(password).map_err(|e| AppError::Internal(e.to_string()))?;
    }
    if let Some(phone) = req.phone {
        admin.phone = Some(phone);
    }
    if let Some(employee_id) = req.employee_id {
        admin.employee_id = Some(employee_id);
    }
    if let Some(country) = req.country {
        admin.country = Some(country);
    }
    if let Some(city) = req.city {
        admin.city = Some(city);
    }
    if let Some(postal_code) = req.postal_code {
        admin.postal_code = Some(postal_code);
    }
    if let Some(links) = &req.social_media {
        admin
            .social_media
            .get_or_insert_with(SocialMedia::default)
            .merge(links);
    }
    if let Some(url) = req.profile_picture_url {
        admin.profile_picture_url = Some(url);
    }
    admin.updated_at = Utc::now();

    if !state.admins.update(admin.clone())? {
        return Err(AppError::NotFound("admin not found".to_string()));
    }

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::admins::update(pool, &admin).await {
            tracing::error!(admin_id = %admin.id, error = %e, "failed to persist admin update to database");
            return Err(AppError::Internal(
                "admin updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(AdminPublic::from(&admin)))
}
