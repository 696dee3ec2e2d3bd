//! Repository for the `movements` table (append-only ledger).

use sqlx::{PgConnection, PgPool};

use crate::models::movement::{CreateMovement, Movement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, badge, delta, balance_after, reason, created_at";

/// Presentation order for a collaborator's movement history.
///
/// Ascending feeds trend charts; descending feeds "most recent first"
/// displays. The underlying rows are the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementOrder {
    Ascending,
    Descending,
}

/// Provides append and read operations for ledger movements.
///
/// There are no update or delete methods: movements are immutable once
/// created.
pub struct MovementRepo;

impl MovementRepo {
    /// Append a movement on an existing connection or transaction.
    ///
    /// Takes an executor rather than the pool so the ledger adjustment can
    /// run the append inside the same transaction as the balance update.
    pub async fn append(
        conn: &mut PgConnection,
        input: &CreateMovement,
    ) -> Result<Movement, sqlx::Error> {
        let query = format!(
            "INSERT INTO movements (badge, delta, balance_after, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(&input.badge)
            .bind(input.delta)
            .bind(input.balance_after)
            .bind(&input.reason)
            .fetch_one(conn)
            .await
    }

    /// List all movements for a collaborator in the requested order.
    ///
    /// Ordered by creation time with id as tie-breaker, so insertion order
    /// is stable even when two movements share a timestamp.
    pub async fn list_for_badge(
        pool: &PgPool,
        badge: &str,
        order: MovementOrder,
    ) -> Result<Vec<Movement>, sqlx::Error> {
        let direction = match order {
            MovementOrder::Ascending => "ASC",
            MovementOrder::Descending => "DESC",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM movements
             WHERE badge = $1
             ORDER BY created_at {direction}, id {direction}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(badge)
            .fetch_all(pool)
            .await
    }
}
