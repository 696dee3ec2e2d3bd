//! Handlers for the `/auth` resource (admin login, refresh, logout, and
//! collaborator access-code login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use timebank_core::error::CoreError;
use timebank_core::permissions::Permissions;
use timebank_core::types::DbId;
use timebank_core::validation::validate_access_code;
use timebank_db::models::collaborator::Collaborator;
use timebank_db::models::movement::Movement;
use timebank_db::repositories::{AdminRepo, CollaboratorRepo, MovementOrder, MovementRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/collaborator-login`.
#[derive(Debug, Deserialize)]
pub struct CollaboratorLoginRequest {
    pub access_code: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminInfo,
}

/// Public administrator info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub permissions: Permissions,
}

/// Response for a collaborator access-code login: the collaborator record
/// plus their full movement history, oldest first.
#[derive(Debug, Serialize)]
pub struct CollaboratorLoginResponse {
    pub collaborator: Collaborator,
    pub movements: Vec<Movement>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate an administrator with username + password. Returns access
/// and refresh tokens together with the current permission flags. Unknown
/// usernames and wrong passwords produce the same 401 so the response does
/// not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let admin = AdminRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let response = create_auth_response(&state, &admin).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// session is revoked (token rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let admin = AdminRepo::find_by_id(&state.pool, session.admin_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Administrator no longer exists".into(),
            ))
        })?;

    let response = create_auth_response(&state, &admin).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated administrator. Returns 204.
pub async fn logout(State(state): State<AppState>, auth: AuthAdmin) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_admin(&state.pool, auth.admin_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/collaborator-login
///
/// Collaborator self-service login by access code. No token is issued; the
/// response is the collaborator record plus their movement history in
/// ascending order. A malformed code is a 400, an unknown one a 404.
pub async fn collaborator_login(
    State(state): State<AppState>,
    Json(input): Json<CollaboratorLoginRequest>,
) -> AppResult<Json<CollaboratorLoginResponse>> {
    validate_access_code(&input.access_code)?;

    let collaborator = CollaboratorRepo::find_by_access_code(&state.pool, &input.access_code)
        .await?
        .ok_or_else(|| {
            // The error echoes only what the caller already sent.
            AppError::Core(CoreError::NotFound {
                entity: "Collaborator with access code",
                id: input.access_code.clone(),
            })
        })?;

    let movements =
        MovementRepo::list_for_badge(&state.pool, &collaborator.badge, MovementOrder::Ascending)
            .await?;

    Ok(Json(CollaboratorLoginResponse {
        collaborator,
        movements,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    admin: &timebank_db::models::admin::Admin,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(admin.id, &admin.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = timebank_db::models::session::CreateSession {
        admin_id: admin.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        admin: AdminInfo {
            id: admin.id,
            username: admin.username.clone(),
            name: admin.name.clone(),
            permissions: admin.permissions(),
        },
    })
}
