//! Administrator entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::permissions::Permissions;
use timebank_core::types::{DbId, Timestamp};

/// Full administrator row from the `administrators` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AdminResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub badge: String,
    pub can_create_collaborator: bool,
    pub can_create_admin: bool,
    pub can_post_hours: bool,
    pub can_change_access_code: bool,
    pub created_at: Timestamp,
}

impl Admin {
    /// Collect the flag columns into the capability record.
    pub fn permissions(&self) -> Permissions {
        Permissions {
            create_collaborator: self.can_create_collaborator,
            create_admin: self.can_create_admin,
            post_hours: self.can_post_hours,
            change_access_code: self.can_change_access_code,
        }
    }
}

/// Safe administrator representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub badge: String,
    pub permissions: Permissions,
    pub created_at: Timestamp,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            name: admin.name.clone(),
            badge: admin.badge.clone(),
            permissions: admin.permissions(),
            created_at: admin.created_at,
        }
    }
}

/// DTO for creating a new administrator. `password_hash` must already be
/// an Argon2id PHC string; hashing happens in the API layer.
#[derive(Debug)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub badge: String,
    pub permissions: Permissions,
}
