//! Handlers for the `/collaborators` resource: registry CRUD, movement
//! history, atomic hour adjustment, and access-code changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use timebank_core::error::CoreError;
use timebank_core::validation::{validate_access_code, validate_delta};
use timebank_db::models::collaborator::{Collaborator, CreateCollaborator};
use timebank_db::models::movement::Movement;
use timebank_db::repositories::{
    AccessCodeUpdate, CollaboratorRepo, LedgerRepo, MovementOrder, MovementRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::middleware::permissions::{
    RequireChangeAccessCode, RequireCreateCollaborator, RequirePostHours,
};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /collaborators`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional search term: exact badge, exact access code, or name substring.
    pub q: Option<String>,
}

/// Query parameters for `GET /collaborators/by-access-code`.
#[derive(Debug, Deserialize)]
pub struct AccessCodeQuery {
    pub access_code: String,
}

/// Query parameters for `GET /collaborators/{badge}/movements`.
#[derive(Debug, Deserialize)]
pub struct MovementsQuery {
    /// `asc` or `desc` (default).
    pub order: Option<String>,
}

/// Request body for `POST /collaborators/{badge}/hours`.
#[derive(Debug, Deserialize)]
pub struct AdjustHoursRequest {
    pub delta: Option<f64>,
    pub reason: Option<String>,
}

/// Request body for `PATCH /collaborators/{badge}/access-code`.
#[derive(Debug, Deserialize)]
pub struct ChangeAccessCodeRequest {
    pub access_code: String,
}

/// Response for a successful hour adjustment: the updated collaborator and
/// the ledger movement that recorded it.
#[derive(Debug, Serialize)]
pub struct AdjustHoursResponse {
    pub collaborator: Collaborator,
    pub movement: Movement,
}

/// Collaborator together with their full movement history.
#[derive(Debug, Serialize)]
pub struct CollaboratorWithHistory {
    pub collaborator: Collaborator,
    pub movements: Vec<Movement>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/collaborators?q=
///
/// List all collaborators (name ascending) or, when `q` is present and
/// non-blank, search by exact badge, exact access code, or case-insensitive
/// name substring.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Collaborator>>>> {
    let collaborators = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => CollaboratorRepo::search(&state.pool, q).await?,
        _ => CollaboratorRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse {
        data: collaborators,
    }))
}

/// POST /api/v1/collaborators
///
/// Register a new collaborator with a zero balance. Requires the
/// create-collaborator permission. Duplicate badges or access codes are
/// 409s via the unique constraints.
pub async fn create(
    State(state): State<AppState>,
    _gate: RequireCreateCollaborator,
    Json(input): Json<CreateCollaborator>,
) -> AppResult<(StatusCode, Json<Collaborator>)> {
    if input.badge.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Badge must not be blank".into(),
        )));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be blank".into(),
        )));
    }
    validate_access_code(&input.access_code)?;

    let collaborator = CollaboratorRepo::create(&state.pool, &input).await?;

    tracing::info!(badge = %collaborator.badge, "Collaborator created");

    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// GET /api/v1/collaborators/by-access-code?access_code=
///
/// Fetch a collaborator and their full movement history (oldest first) by
/// access code. This is the self-service lookup path, so it takes no Bearer
/// token; the access code itself is the credential.
pub async fn by_access_code(
    State(state): State<AppState>,
    Query(params): Query<AccessCodeQuery>,
) -> AppResult<Json<CollaboratorWithHistory>> {
    validate_access_code(&params.access_code)?;

    let collaborator = CollaboratorRepo::find_by_access_code(&state.pool, &params.access_code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Collaborator with access code",
                id: params.access_code.clone(),
            })
        })?;

    let movements =
        MovementRepo::list_for_badge(&state.pool, &collaborator.badge, MovementOrder::Ascending)
            .await?;

    Ok(Json(CollaboratorWithHistory {
        collaborator,
        movements,
    }))
}

/// GET /api/v1/collaborators/{badge}/movements?order=
///
/// List a collaborator's movements. `order=asc` gives oldest first (trend
/// views); anything else gives most recent first.
pub async fn movements(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(badge): Path<String>,
    Query(params): Query<MovementsQuery>,
) -> AppResult<Json<DataResponse<Vec<Movement>>>> {
    // 404 for unknown badges rather than an empty list.
    CollaboratorRepo::find_by_badge(&state.pool, &badge)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Collaborator",
                id: badge.clone(),
            })
        })?;

    let order = match params.order.as_deref() {
        Some("asc") => MovementOrder::Ascending,
        _ => MovementOrder::Descending,
    };
    let movements = MovementRepo::list_for_badge(&state.pool, &badge, order).await?;

    Ok(Json(DataResponse { data: movements }))
}

/// POST /api/v1/collaborators/{badge}/hours
///
/// Apply a signed hour delta to a collaborator's balance and append the
/// matching ledger movement, atomically. Requires the post-hours
/// permission. When no reason is supplied, one is generated naming the
/// acting administrator.
pub async fn adjust_hours(
    State(state): State<AppState>,
    gate: RequirePostHours,
    Path(badge): Path<String>,
    Json(input): Json<AdjustHoursRequest>,
) -> AppResult<(StatusCode, Json<AdjustHoursResponse>)> {
    let delta = input.delta.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Delta is required".into()))
    })?;
    validate_delta(delta)?;

    let reason = match input.reason.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => Some(r.to_string()),
        _ => Some(format!("Manual adjustment ({})", gate.0.username)),
    };

    let (collaborator, movement) = LedgerRepo::adjust(&state.pool, &badge, delta, reason)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Collaborator",
                id: badge.clone(),
            })
        })?;

    tracing::info!(
        badge = %badge,
        delta,
        balance = collaborator.balance,
        admin = %gate.0.username,
        "Hours adjusted"
    );

    Ok((
        StatusCode::CREATED,
        Json(AdjustHoursResponse {
            collaborator,
            movement,
        }),
    ))
}

/// PATCH /api/v1/collaborators/{badge}/access-code
///
/// Change a collaborator's access code. Requires the change-access-code
/// permission. A malformed code is a 400, an unknown badge a 404, and a
/// code already held by someone else a 409.
pub async fn change_access_code(
    State(state): State<AppState>,
    _gate: RequireChangeAccessCode,
    Path(badge): Path<String>,
    Json(input): Json<ChangeAccessCodeRequest>,
) -> AppResult<Json<Collaborator>> {
    validate_access_code(&input.access_code)?;

    match CollaboratorRepo::update_access_code(&state.pool, &badge, &input.access_code).await? {
        AccessCodeUpdate::Updated(collaborator) => {
            tracing::info!(badge = %badge, "Access code changed");
            Ok(Json(collaborator))
        }
        AccessCodeUpdate::BadgeNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Collaborator",
            id: badge,
        })),
        AccessCodeUpdate::CodeInUse => Err(AppError::Core(CoreError::Conflict(
            "Access code is already in use".into(),
        ))),
    }
}
