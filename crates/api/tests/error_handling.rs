//! Tests for the `{error, code}` envelope produced by the error type.

mod common;

use axum::http::StatusCode;
use common::{assert_error_envelope, get, post_json};
use sqlx::PgPool;

/// Validation failures use the VALIDATION_ERROR code and a usable message.
#[sqlx::test(migrations = "../db/migrations")]
async fn validation_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "access_code": "12" });
    let response = post_json(app, "/api/v1/auth/collaborator-login", body).await;

    let message =
        assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert!(
        message.contains("6 to 10 digits"),
        "message should state the format rule, got: {message}"
    );
}

/// Missing records use the NOT_FOUND code.
#[sqlx::test(migrations = "../db/migrations")]
async fn not_found_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/collaborators/by-access-code?access_code=123456").await;

    assert_error_envelope(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

/// Requests without a token use the UNAUTHORIZED code.
#[sqlx::test(migrations = "../db/migrations")]
async fn unauthorized_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/collaborators").await;

    let message = assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert!(message.contains("Authorization"), "got: {message}");
}

/// A syntactically valid but forged token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_token_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get_auth(app, "/api/v1/collaborators", "not.a.jwt").await;

    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}
