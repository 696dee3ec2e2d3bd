//! Admin session model and DTO.

use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// An admin session row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub admin_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new admin session.
pub struct CreateSession {
    pub admin_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
