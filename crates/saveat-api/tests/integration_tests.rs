//! End-to-end tests for the Saveat API, driving the full router through
//! `tower::ServiceExt::oneshot` against in-memory state.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use saveat_api::{app, AppState};

fn test_state() -> AppState {
    AppState::new_in_memory("test-secret")
}

/// Fire one request at a fresh router sharing `state`, returning the
/// status and the parsed JSON body (or `Value::Null` for empty/non-JSON
/// bodies).
async fn send(
    state: &AppState,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register an administrator and return the session token.
async fn register(state: &AppState, email: &str, password: &str, role: &str) -> String {
    let (status, body) = send(
        state,
        Method::POST,
        "/api/v1/admins/register",
        None,
        Some(json!({
            "first_name": "Ana",
            "last_name": "Lopez",
            "email": email,
            "password": password,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Create a product and return its id.
async fn create_product(state: &AppState, token: &str, name: &str) -> String {
    let (status, body) = send(
        state,
        Method::POST,
        "/api/v1/products",
        Some(token),
        Some(json!({
            "name": name,
            "quantity_available": 10,
            "quantity_total_received": 10,
            "unit": "kg",
            "donor_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "expiry_date": "2026-12-31T00:00:00Z",
            "pickup_window_hours": 48,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "product create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn greeting_and_health_probes() {
    let state = test_state();

    let (status, _) = send(&state, Method::GET, "/api/v1", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, Method::GET, "/health/liveness", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, Method::GET, "/health/readiness", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let state = test_state();
    let (status, body) = send(&state, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/admins/login"].is_object());
}

#[tokio::test]
async fn register_returns_token_and_public_projection() {
    let state = test_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/register",
        None,
        Some(json!({
            "first_name": "Ana",
            "last_name": "Lopez",
            "email": "Ana@Saveat.org",
            "password": "hunter22",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["token"].as_str().unwrap().is_empty());
    // Email is stored normalized, role defaults to gestor.
    assert_eq!(body["admin"]["email"], "ana@saveat.org");
    assert_eq!(body["admin"]["role"], "gestor");
    // The password hash never appears in any projection.
    let admin_json = body["admin"].to_string();
    assert!(!admin_json.contains("password"));
    assert!(!admin_json.contains("hash"));
}

#[tokio::test]
async fn register_duplicate_email_is_rejected_case_insensitively() {
    let state = test_state();
    register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/register",
        None,
        Some(json!({
            "first_name": "Otra",
            "last_name": "Persona",
            "email": "  ANA@Saveat.ORG ",
            "password": "different",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_missing_field_is_a_400_with_detail() {
    let state = test_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/register",
        None,
        Some(json!({
            "first_name": "Ana",
            "last_name": "Lopez",
            "email": "ana@saveat.org",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"].is_object());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = test_state();
    register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": "ana@saveat.org", "password": "wrong"})),
    )
    .await;
    let (no_user_status, no_user_body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": "nobody@saveat.org", "password": "hunter22"})),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body["error"]["message"], no_user_body["error"]["message"]);
}

#[tokio::test]
async fn login_with_correct_credentials_succeeds() {
    let state = test_state();
    register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": " ANA@saveat.org ", "password": "hunter22"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["admin"]["email"], "ana@saveat.org");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_garbage_tokens() {
    let state = test_state();

    let (status, body) = send(&state, Method::GET, "/api/v1/admins/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &state,
        Method::GET,
        "/api/v1/admins/profile",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let state = test_state();
    register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let other = AppState::new_in_memory("other-secret");
    let foreign_token = register(&other, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, _) = send(
        &state,
        Method::GET,
        "/api/v1/admins/profile",
        Some(&foreign_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_roundtrip() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "admin").await;

    let (status, body) = send(
        &state,
        Method::GET,
        "/api/v1/admins/profile",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@saveat.org");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn partial_profile_update_leaves_other_fields_unchanged() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, body) = send(
        &state,
        Method::PUT,
        "/api/v1/admins/profile",
        Some(&token),
        Some(json!({"phone": "123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "123");
    assert_eq!(body["email"], "ana@saveat.org");
    assert_eq!(body["first_name"], "Ana");
    assert_eq!(body["last_name"], "Lopez");
    assert_eq!(body["role"], "gestor");

    // Password untouched: the original one still logs in.
    let (status, _) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": "ana@saveat.org", "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn profile_password_change_rehashes() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/v1/admins/profile",
        Some(&token),
        Some(json!({"password": "new-secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (old_status, _) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": "ana@saveat.org", "password": "hunter22"})),
    )
    .await;
    assert_eq!(old_status, StatusCode::UNAUTHORIZED);

    let (new_status, _) = send(
        &state,
        Method::POST,
        "/api/v1/admins/login",
        None,
        Some(json!({"email": "ana@saveat.org", "password": "new-secret"})),
    )
    .await;
    assert_eq!(new_status, StatusCode::OK);
}

#[tokio::test]
async fn profile_email_change_cannot_take_anothers_email() {
    let state = test_state();
    register(&state, "first@saveat.org", "hunter22", "gestor").await;
    let token = register(&state, "second@saveat.org", "hunter22", "gestor").await;

    let (status, body) = send(
        &state,
        Method::PUT,
        "/api/v1/admins/profile",
        Some(&token),
        Some(json!({"email": "FIRST@saveat.org"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn social_media_links_merge_per_subfield() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/v1/admins/profile",
        Some(&token),
        Some(json!({"social_media": {"instagram": "@saveat"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &state,
        Method::PUT,
        "/api/v1/admins/profile",
        Some(&token),
        Some(json!({"social_media": {"linkedin": "saveat-org"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["social_media"]["instagram"], "@saveat");
    assert_eq!(body["social_media"]["linkedin"], "saveat-org");
}

#[tokio::test]
async fn product_create_and_fetch() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;
    let id = create_product(&state, &token, "Arroz integral").await;

    let (status, body) = send(
        &state,
        Method::GET,
        &format!("/api/v1/products/{id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Arroz integral");
    assert_eq!(body["status"], "borrador");
    assert_eq!(body["quantity_available"], 10);
}

#[tokio::test]
async fn product_listing_is_newest_first() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;
    create_product(&state, &token, "Primero").await;
    create_product(&state, &token, "Segundo").await;

    let (status, body) = send(
        &state,
        Method::GET,
        "/api/v1/products/admin",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Segundo");
    assert_eq!(list[1]["name"], "Primero");
}

#[tokio::test]
async fn product_missing_required_field_creates_nothing() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    // No expiry_date.
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        Some(json!({
            "name": "Sin caducidad",
            "quantity_available": 1,
            "quantity_total_received": 1,
            "unit": "kg",
            "donor_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "pickup_window_hours": 24,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"].is_object());

    let (_, list) = send(
        &state,
        Method::GET,
        "/api/v1/products/admin",
        Some(&token),
        None,
    )
    .await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_negative_quantity_is_rejected() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, _) = send(
        &state,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        Some(json!({
            "name": "Cantidad rota",
            "quantity_available": -1,
            "quantity_total_received": 1,
            "unit": "kg",
            "donor_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "expiry_date": "2026-12-31T00:00:00Z",
            "pickup_window_hours": 24,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_partial_update_merges_and_revalidates() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;
    let id = create_product(&state, &token, "Lentejas").await;

    let (status, body) = send(
        &state,
        Method::PUT,
        &format!("/api/v1/products/{id}"),
        Some(&token),
        Some(json!({"quantity_available": 3, "status": "disponible"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lentejas");
    assert_eq!(body["quantity_available"], 3);
    assert_eq!(body["status"], "disponible");

    // A merge that would leave the record invalid is a 400 and the
    // stored record keeps its previous values.
    let (status, _) = send(
        &state,
        Method::PUT,
        &format!("/api/v1/products/{id}"),
        Some(&token),
        Some(json!({"quantity_available": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(
        &state,
        Method::GET,
        &format!("/api/v1/products/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["quantity_available"], 3);
}

#[tokio::test]
async fn product_fetch_unknown_id_is_404() {
    let state = test_state();
    let token = register(&state, "ana@saveat.org", "hunter22", "gestor").await;

    let (status, body) = send(
        &state,
        Method::GET,
        "/api/v1/products/7c9e6679-7425-40de-944b-e07fc1f90ae7",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn product_delete_requires_admin_role() {
    let state = test_state();
    let admin_token = register(&state, "admin@saveat.org", "hunter22", "admin").await;
    let gestor_token = register(&state, "gestor@saveat.org", "hunter22", "gestor").await;
    let id = create_product(&state, &gestor_token, "Pan de molde").await;

    let (status, body) = send(
        &state,
        Method::DELETE,
        &format!("/api/v1/products/{id}"),
        Some(&gestor_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, body) = send(
        &state,
        Method::DELETE,
        &format!("/api/v1/products/{id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, _) = send(
        &state,
        Method::GET,
        &format!("/api/v1/products/{id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_sequence_calls_yield_distinct_consecutive_values() {
    let state = test_state();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state.next_sequence("employee_id").await.unwrap()
        }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap());
    }
    seen.sort_unstable();
    let expected: Vec<i64> = (1..=50).collect();
    assert_eq!(seen, expected);
}
