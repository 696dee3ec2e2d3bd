//! HTTP-level integration tests for the collaborator endpoints: registry
//! CRUD, search, movement history, hour adjustment, and access-code change.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, patch_json_auth, post_json, post_json_auth,
};
use sqlx::PgPool;
use timebank_api::auth::password::hash_password;
use timebank_core::permissions::Permissions;
use timebank_db::models::admin::CreateAdmin;
use timebank_db::models::collaborator::CreateCollaborator;
use timebank_db::repositories::{AdminRepo, CollaboratorRepo, MovementOrder, MovementRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an administrator with the given permissions and return a valid
/// access token for them.
async fn admin_token(pool: &PgPool, username: &str, permissions: Permissions) -> String {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateAdmin {
        username: username.to_string(),
        password_hash: hashed,
        name: format!("{username} (test)"),
        badge: "900001".to_string(),
        permissions,
    };
    AdminRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Insert a collaborator directly through the repository.
async fn seed_collaborator(pool: &PgPool, badge: &str, access_code: &str, name: &str) {
    let input = CreateCollaborator {
        badge: badge.to_string(),
        access_code: access_code.to_string(),
        name: name.to_string(),
        role: "Operator".to_string(),
        shift: "Day".to_string(),
        supervisor: "Carlos".to_string(),
    };
    CollaboratorRepo::create(pool, &input)
        .await
        .expect("collaborator creation should succeed");
}

fn collaborator_body(badge: &str, access_code: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "badge": badge,
        "access_code": access_code,
        "name": name,
        "role": "Operator",
        "shift": "Day",
        "supervisor": "Carlos",
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Creating a collaborator returns 201 with a zero balance.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_collaborator(pool: PgPool) {
    let token = admin_token(&pool, "creator", Permissions::all()).await;
    let app = common::build_test_app(pool);

    let body = collaborator_body("B200", "222333", "Bruno Lima");
    let response = post_json_auth(app, "/api/v1/collaborators", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["badge"], "B200");
    assert_eq!(json["access_code"], "222333");
    assert_eq!(json["balance"], 0.0);
}

/// Malformed access codes and blank fields are 400s.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_collaborator_validation(pool: PgPool) {
    let token = admin_token(&pool, "creator", Permissions::all()).await;
    let app = common::build_test_app(pool);

    // Access code too short.
    let body = collaborator_body("B201", "12345", "Short Code");
    let response = post_json_auth(app.clone(), "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Access code with non-digits.
    let body = collaborator_body("B202", "12a456", "Bad Code");
    let response = post_json_auth(app.clone(), "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blank badge.
    let body = collaborator_body("   ", "123456", "No Badge");
    let response = post_json_auth(app.clone(), "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blank name.
    let body = collaborator_body("B203", "123456", "");
    let response = post_json_auth(app, "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Duplicate badge or access code is a 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_collaborator_conflicts(pool: PgPool) {
    seed_collaborator(&pool, "B210", "111222", "Existing").await;
    let token = admin_token(&pool, "creator", Permissions::all()).await;
    let app = common::build_test_app(pool);

    // Same badge, different code.
    let body = collaborator_body("B210", "333444", "Badge Clash");
    let response = post_json_auth(app.clone(), "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Different badge, same code.
    let body = collaborator_body("B211", "111222", "Code Clash");
    let response = post_json_auth(app, "/api/v1/collaborators", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Creating without the createCollaborator flag is a 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_collaborator_forbidden(pool: PgPool) {
    let token = admin_token(&pool, "limited", Permissions::none()).await;
    let app = common::build_test_app(pool);

    let body = collaborator_body("B220", "555666", "Denied");
    let response = post_json_auth(app, "/api/v1/collaborators", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// List / search
// ---------------------------------------------------------------------------

/// Listing requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/collaborators").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Full listing comes back in name-ascending order.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_orders_by_name(pool: PgPool) {
    seed_collaborator(&pool, "B301", "111111", "Zara").await;
    seed_collaborator(&pool, "B302", "222222", "Ana").await;
    seed_collaborator(&pool, "B303", "333333", "Mia").await;
    let token = admin_token(&pool, "reader", Permissions::none()).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/collaborators", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana", "Mia", "Zara"]);
}

/// `q` matches exact badge, exact access code, or name substring.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search(pool: PgPool) {
    seed_collaborator(&pool, "B310", "444555", "Mariana Costa").await;
    seed_collaborator(&pool, "B311", "666777", "Jorge Ramos").await;
    let token = admin_token(&pool, "reader", Permissions::none()).await;
    let app = common::build_test_app(pool);

    // Exact badge.
    let response = get_auth(app.clone(), "/api/v1/collaborators?q=B310", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["badge"], "B310");

    // Exact access code.
    let response = get_auth(app.clone(), "/api/v1/collaborators?q=666777", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["badge"], "B311");

    // Case-insensitive name substring.
    let response = get_auth(app.clone(), "/api/v1/collaborators?q=mariana", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "Mariana Costa");

    // No match.
    let response = get_auth(app, "/api/v1/collaborators?q=nobody", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Lookup by access code (public)
// ---------------------------------------------------------------------------

/// The by-access-code lookup returns the collaborator and ascending history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_by_access_code(pool: PgPool) {
    seed_collaborator(&pool, "B320", "123321", "Paula").await;
    let token = admin_token(&pool, "poster", Permissions::all()).await;

    // Build some history through the API.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "delta": 3.0 });
    let response = post_json_auth(app, "/api/v1/collaborators/B320/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "delta": -1.5 });
    let response = post_json_auth(app, "/api/v1/collaborators/B320/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/collaborators/by-access-code?access_code=123321").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["collaborator"]["badge"], "B320");
    assert_eq!(json["collaborator"]["balance"], 1.5);
    let movements = json["movements"].as_array().unwrap();
    assert_eq!(movements.len(), 2);
    assert_eq!(movements[0]["delta"], 3.0, "history must be oldest first");
    assert_eq!(movements[0]["balance_after"], 3.0);
    assert_eq!(movements[1]["balance_after"], 1.5);
}

/// Bad format is 400; unknown code is 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_by_access_code_failures(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(
        app.clone(),
        "/api/v1/collaborators/by-access-code?access_code=12ab",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        app,
        "/api/v1/collaborators/by-access-code?access_code=987654",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

/// Movement listing honours the order parameter and defaults to descending.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_movements_ordering(pool: PgPool) {
    seed_collaborator(&pool, "B330", "777888", "Rafael").await;
    let token = admin_token(&pool, "poster", Permissions::all()).await;

    for delta in [1.0, 2.0, 3.0] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "delta": delta });
        let response = post_json_auth(app, "/api/v1/collaborators/B330/hours", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Default: most recent first.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/collaborators/B330/movements", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let deltas: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["delta"].as_f64().unwrap())
        .collect();
    assert_eq!(deltas, vec![3.0, 2.0, 1.0]);

    // Ascending when asked.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/collaborators/B330/movements?order=asc", &token).await;
    let json = body_json(response).await;
    let deltas: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["delta"].as_f64().unwrap())
        .collect();
    assert_eq!(deltas, vec![1.0, 2.0, 3.0]);
}

/// Movements for an unknown badge is a 404, not an empty list.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_movements_unknown_badge(pool: PgPool) {
    let token = admin_token(&pool, "reader", Permissions::none()).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/collaborators/NOPE/movements", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Hour adjustment
// ---------------------------------------------------------------------------

/// A sequence of adjustments keeps the running balance and balance_after
/// in sync, rounded to one decimal place.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_adjust_hours_sequence(pool: PgPool) {
    seed_collaborator(&pool, "B340", "112233", "Sofia").await;
    let token = admin_token(&pool, "poster", Permissions::all()).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "delta": 2.0, "reason": "Overtime" });
    let response = post_json_auth(app, "/api/v1/collaborators/B340/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["collaborator"]["balance"], 2.0);
    assert_eq!(json["movement"]["delta"], 2.0);
    assert_eq!(json["movement"]["balance_after"], 2.0);
    assert_eq!(json["movement"]["reason"], "Overtime");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "delta": -0.5 });
    let response = post_json_auth(app, "/api/v1/collaborators/B340/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["collaborator"]["balance"], 1.5);
    assert_eq!(json["movement"]["balance_after"], 1.5);
}

/// An omitted reason defaults to a string naming the acting administrator.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_adjust_hours_default_reason(pool: PgPool) {
    seed_collaborator(&pool, "B341", "445566", "Tiago").await;
    let token = admin_token(&pool, "shift_lead", Permissions::all()).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "delta": 1.0 });
    let response = post_json_auth(app, "/api/v1/collaborators/B341/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["movement"]["reason"], "Manual adjustment (shift_lead)");
}

/// Zero, missing, and non-finite deltas are 400s and append nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_adjust_hours_invalid_delta(pool: PgPool) {
    seed_collaborator(&pool, "B342", "778899", "Vera").await;
    let token = admin_token(&pool, "poster", Permissions::all()).await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "delta": 0.0 });
    let response = post_json_auth(
        app.clone(),
        "/api/v1/collaborators/B342/hours",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "reason": "no delta at all" });
    let response = post_json_auth(app, "/api/v1/collaborators/B342/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was appended and the balance is untouched.
    let movements = MovementRepo::list_for_badge(&pool, "B342", MovementOrder::Ascending)
        .await
        .unwrap();
    assert!(movements.is_empty(), "failed adjustments must not append");
    let collaborator = CollaboratorRepo::find_by_badge(&pool, "B342")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(collaborator.balance, 0.0);
}

/// Adjusting an unknown badge is a 404 and appends nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_adjust_hours_unknown_badge(pool: PgPool) {
    let token = admin_token(&pool, "poster", Permissions::all()).await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "delta": 1.0 });
    let response = post_json_auth(app, "/api/v1/collaborators/GHOST/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let movements = MovementRepo::list_for_badge(&pool, "GHOST", MovementOrder::Ascending)
        .await
        .unwrap();
    assert!(movements.is_empty());
}

/// Posting hours without the postHours flag is a 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_adjust_hours_forbidden(pool: PgPool) {
    seed_collaborator(&pool, "B343", "990011", "Walter").await;
    let permissions = Permissions {
        create_collaborator: true,
        ..Permissions::none()
    };
    let token = admin_token(&pool, "limited", permissions).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "delta": 1.0 });
    let response = post_json_auth(app, "/api/v1/collaborators/B343/hours", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Access-code change
// ---------------------------------------------------------------------------

/// Changing an access code succeeds and the old code stops resolving.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_access_code(pool: PgPool) {
    seed_collaborator(&pool, "B350", "101010", "Yara").await;
    let token = admin_token(&pool, "changer", Permissions::all()).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "access_code": "202020" });
    let response =
        patch_json_auth(app, "/api/v1/collaborators/B350/access-code", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["access_code"], "202020");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/collaborators/by-access-code?access_code=101010").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/collaborators/by-access-code?access_code=202020").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Format, existence, and uniqueness failures map to 400 / 404 / 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_access_code_failures(pool: PgPool) {
    seed_collaborator(&pool, "B351", "303030", "Zeca").await;
    seed_collaborator(&pool, "B352", "404040", "Alice").await;
    let token = admin_token(&pool, "changer", Permissions::all()).await;
    let app = common::build_test_app(pool);

    // Malformed code.
    let body = serde_json::json!({ "access_code": "abc" });
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/collaborators/B351/access-code",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown badge.
    let body = serde_json::json!({ "access_code": "505050" });
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/collaborators/GHOST/access-code",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Code held by a different collaborator.
    let body = serde_json::json!({ "access_code": "404040" });
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/collaborators/B351/access-code",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Re-setting a collaborator's own code is a no-op, not a conflict.
    let body = serde_json::json!({ "access_code": "303030" });
    let response = patch_json_auth(app, "/api/v1/collaborators/B351/access-code", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Changing a code without the changeAccessCode flag is a 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_access_code_forbidden(pool: PgPool) {
    seed_collaborator(&pool, "B353", "606060", "Bento").await;
    let token = admin_token(&pool, "limited", Permissions::none()).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "access_code": "707070" });
    let response =
        patch_json_auth(app, "/api/v1/collaborators/B353/access-code", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
