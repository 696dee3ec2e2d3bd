//! Repository for the `collaborators` table.

use sqlx::PgPool;

use crate::models::collaborator::{Collaborator, CreateCollaborator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, badge, access_code, name, role, shift, supervisor, balance, \
                        created_at, updated_at";

/// Outcome of [`CollaboratorRepo::update_access_code`].
#[derive(Debug)]
pub enum AccessCodeUpdate {
    /// The code was changed; carries the updated row.
    Updated(Collaborator),
    /// No collaborator with the given badge exists.
    BadgeNotFound,
    /// The new code already belongs to a different collaborator.
    CodeInUse,
}

/// Provides CRUD operations for collaborators.
///
/// Balance mutations are deliberately absent here: the only write path for
/// `balance` is [`crate::repositories::LedgerRepo::adjust`].
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Insert a new collaborator with a zero balance, returning the created row.
    ///
    /// Duplicate badges or access codes surface as unique-constraint
    /// violations (`uq_collaborators_badge` / `uq_collaborators_access_code`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollaborator,
    ) -> Result<Collaborator, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaborators (badge, access_code, name, role, shift, supervisor)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(&input.badge)
            .bind(&input.access_code)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.shift)
            .bind(&input.supervisor)
            .fetch_one(pool)
            .await
    }

    /// Find a collaborator by badge.
    pub async fn find_by_badge(
        pool: &PgPool,
        badge: &str,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators WHERE badge = $1");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(badge)
            .fetch_optional(pool)
            .await
    }

    /// Find a collaborator by access code (exact match; codes are unique).
    pub async fn find_by_access_code(
        pool: &PgPool,
        access_code: &str,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators WHERE access_code = $1");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(access_code)
            .fetch_optional(pool)
            .await
    }

    /// List all collaborators ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators ORDER BY name ASC");
        sqlx::query_as::<_, Collaborator>(&query)
            .fetch_all(pool)
            .await
    }

    /// Search by exact badge, exact access code, or case-insensitive name
    /// substring. Results are ordered by name ascending.
    pub async fn search(pool: &PgPool, q: &str) -> Result<Vec<Collaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaborators
             WHERE badge = $1 OR access_code = $1 OR name ILIKE '%' || $2 || '%'
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(q)
            .bind(escape_like(q))
            .fetch_all(pool)
            .await
    }

    /// Change a collaborator's access code.
    ///
    /// Fails with [`AccessCodeUpdate::CodeInUse`] when the code belongs to a
    /// different collaborator and [`AccessCodeUpdate::BadgeNotFound`] when
    /// the badge is unknown. Setting a collaborator's current code is a
    /// no-op update, not a conflict. The check and the update run in one
    /// transaction; a racing insert still trips the unique constraint.
    pub async fn update_access_code(
        pool: &PgPool,
        badge: &str,
        new_code: &str,
    ) -> Result<AccessCodeUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owner: Option<String> =
            sqlx::query_scalar("SELECT badge FROM collaborators WHERE access_code = $1")
                .bind(new_code)
                .fetch_optional(&mut *tx)
                .await?;
        if let Some(owner_badge) = owner {
            if owner_badge != badge {
                return Ok(AccessCodeUpdate::CodeInUse);
            }
        }

        let query = format!(
            "UPDATE collaborators SET access_code = $2, updated_at = NOW()
             WHERE badge = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Collaborator>(&query)
            .bind(badge)
            .bind(new_code)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(match updated {
            Some(row) => AccessCodeUpdate::Updated(row),
            None => AccessCodeUpdate::BadgeNotFound,
        })
    }
}

/// Escape `%`, `_`, and the escape character itself for use inside a LIKE
/// pattern, so a query string matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_handles_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
