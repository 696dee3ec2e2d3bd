//! Permission-gate extractors, one per capability flag.
//!
//! Each gate wraps [`AuthAdmin`] and then re-reads the administrator row
//! from the database, rejecting with 403 Forbidden unless the relevant
//! flag is set there. The token (and any permission set a client holds)
//! is never trusted for authorization -- it identifies the caller, nothing
//! more. An administrator deleted after token issue is rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use timebank_core::error::CoreError;
use timebank_core::permissions::Permissions;
use timebank_db::repositories::AdminRepo;

use super::auth::AuthAdmin;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the caller's current permissions from the administrators table.
async fn resolve_permissions(
    parts: &mut Parts,
    state: &AppState,
) -> Result<(AuthAdmin, Permissions), AppError> {
    let auth = AuthAdmin::from_request_parts(parts, state).await?;
    let admin = AdminRepo::find_by_id(&state.pool, auth.admin_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Administrator no longer exists".into(),
            ))
        })?;
    Ok((auth, admin.permissions()))
}

/// Requires the `create_collaborator` flag. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn create(RequireCreateCollaborator(admin): RequireCreateCollaborator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCreateCollaborator(pub AuthAdmin);

impl FromRequestParts<AppState> for RequireCreateCollaborator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (auth, permissions) = resolve_permissions(parts, state).await?;
        if !permissions.create_collaborator {
            return Err(AppError::Core(CoreError::Forbidden(
                "Permission to create collaborators required".into(),
            )));
        }
        Ok(RequireCreateCollaborator(auth))
    }
}

/// Requires the `create_admin` flag. Rejects with 403 Forbidden otherwise.
pub struct RequireCreateAdmin(pub AuthAdmin);

impl FromRequestParts<AppState> for RequireCreateAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (auth, permissions) = resolve_permissions(parts, state).await?;
        if !permissions.create_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Permission to create administrators required".into(),
            )));
        }
        Ok(RequireCreateAdmin(auth))
    }
}

/// Requires the `post_hours` flag. Rejects with 403 Forbidden otherwise.
pub struct RequirePostHours(pub AuthAdmin);

impl FromRequestParts<AppState> for RequirePostHours {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (auth, permissions) = resolve_permissions(parts, state).await?;
        if !permissions.post_hours {
            return Err(AppError::Core(CoreError::Forbidden(
                "Permission to post hours required".into(),
            )));
        }
        Ok(RequirePostHours(auth))
    }
}

/// Requires the `change_access_code` flag. Rejects with 403 Forbidden otherwise.
pub struct RequireChangeAccessCode(pub AuthAdmin);

impl FromRequestParts<AppState> for RequireChangeAccessCode {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (auth, permissions) = resolve_permissions(parts, state).await?;
        if !permissions.change_access_code {
            return Err(AppError::Core(CoreError::Forbidden(
                "Permission to change access codes required".into(),
            )));
        }
        Ok(RequireChangeAccessCode(auth))
    }
}
