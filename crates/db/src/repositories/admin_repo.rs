//! Repository for the `administrators` table.

use sqlx::PgPool;
use timebank_core::types::DbId;

use crate::models::admin::{Admin, CreateAdmin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, name, badge, can_create_collaborator, \
                        can_create_admin, can_post_hours, can_change_access_code, created_at";

/// Provides CRUD operations for administrators.
///
/// There is no update method: permissions change only by creating a new
/// administrator record.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new administrator, returning the created row.
    ///
    /// A duplicate username surfaces as a unique-constraint violation
    /// (`uq_administrators_username`).
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO administrators
                (username, password_hash, name, badge,
                 can_create_collaborator, can_create_admin, can_post_hours, can_change_access_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.badge)
            .bind(input.permissions.create_collaborator)
            .bind(input.permissions.create_admin)
            .bind(input.permissions.post_hours)
            .bind(input.permissions.change_access_code)
            .fetch_one(pool)
            .await
    }

    /// Find an administrator by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM administrators WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an administrator by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM administrators WHERE username = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all administrators ordered by username ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM administrators ORDER BY username ASC");
        sqlx::query_as::<_, Admin>(&query).fetch_all(pool).await
    }

    /// Count administrators. Used by the startup bootstrap to decide
    /// whether the master profile needs seeding.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM administrators")
            .fetch_one(pool)
            .await
    }
}
