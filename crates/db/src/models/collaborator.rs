//! Collaborator entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// Full collaborator row from the `collaborators` table.
///
/// `badge` is the stable business key; `access_code` is the mutable
/// self-service credential; `balance` is the running hour total, always
/// rounded to one decimal place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collaborator {
    pub id: DbId,
    pub badge: String,
    pub access_code: String,
    pub name: String,
    pub role: String,
    pub shift: String,
    pub supervisor: String,
    pub balance: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new collaborator. Balance always starts at zero.
#[derive(Debug, Deserialize)]
pub struct CreateCollaborator {
    pub badge: String,
    pub access_code: String,
    pub name: String,
    pub role: String,
    pub shift: String,
    pub supervisor: String,
}
