//! Handlers for the `/admins` resource (administrator registry).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use timebank_core::error::CoreError;
use timebank_core::permissions::Permissions;
use timebank_db::models::admin::{AdminResponse, CreateAdmin};
use timebank_db::repositories::AdminRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::middleware::permissions::RequireCreateAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length for new administrators.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Request body for `POST /admins`. The permission flags default to false
/// when omitted, so a new administrator starts with no capabilities unless
/// the creator grants them explicitly.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub badge: String,
    #[serde(default)]
    pub permissions: Permissions,
}

/// GET /api/v1/admins
///
/// List all administrators (username ascending) with their permission
/// flags. Password hashes never leave the database layer's full model.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> AppResult<Json<DataResponse<Vec<AdminResponse>>>> {
    let admins = AdminRepo::list(&state.pool).await?;
    let data = admins.iter().map(AdminResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admins
///
/// Create a new administrator. Requires the create-admin permission. Blank
/// fields or a weak password are 400s; a taken username is a 409 via the
/// unique constraint.
pub async fn create(
    State(state): State<AppState>,
    _gate: RequireCreateAdmin,
    Json(input): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<AdminResponse>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be blank".into(),
        )));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be blank".into(),
        )));
    }
    if input.badge.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Badge must not be blank".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateAdmin {
        username: input.username,
        password_hash,
        name: input.name,
        badge: input.badge,
        permissions: input.permissions,
    };
    let admin = AdminRepo::create(&state.pool, &create).await?;

    tracing::info!(username = %admin.username, "Administrator created");

    Ok((StatusCode::CREATED, Json(AdminResponse::from(&admin))))
}
