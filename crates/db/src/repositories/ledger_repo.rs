//! The balance adjustment operation.
//!
//! This is the only write path that touches both the collaborator balance
//! and the movement ledger. Both writes happen in one transaction with the
//! collaborator row locked, so concurrent adjustments for the same badge
//! serialize instead of losing updates, and a failure after the balance
//! update cannot leave the ledger behind.

use sqlx::PgPool;
use timebank_core::validation::round1;

use crate::models::collaborator::Collaborator;
use crate::models::movement::{CreateMovement, Movement};
use crate::repositories::MovementRepo;

/// Column list for the collaborator row returned by the update.
const COLLABORATOR_COLUMNS: &str =
    "id, badge, access_code, name, role, shift, supervisor, balance, created_at, updated_at";

/// Runs the atomic balance adjustment.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Apply a signed hour delta to a collaborator's balance and append the
    /// matching ledger movement.
    ///
    /// The new balance is `round1(balance + delta)`. Returns `None` when no
    /// collaborator with the given badge exists; delta validation (non-zero,
    /// finite) is the caller's responsibility.
    pub async fn adjust(
        pool: &PgPool,
        badge: &str,
        delta: f64,
        reason: Option<String>,
    ) -> Result<Option<(Collaborator, Movement)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the row for the duration of the transaction. A concurrent
        // adjustment for the same badge blocks here and then reads the
        // committed balance instead of a stale one.
        let balance: Option<f64> =
            sqlx::query_scalar("SELECT balance FROM collaborators WHERE badge = $1 FOR UPDATE")
                .bind(badge)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(balance) = balance else {
            return Ok(None);
        };

        let new_balance = round1(balance + delta);

        let query = format!(
            "UPDATE collaborators SET balance = $2, updated_at = NOW()
             WHERE badge = $1
             RETURNING {COLLABORATOR_COLUMNS}"
        );
        let collaborator = sqlx::query_as::<_, Collaborator>(&query)
            .bind(badge)
            .bind(new_balance)
            .fetch_one(&mut *tx)
            .await?;

        let movement = MovementRepo::append(
            &mut *tx,
            &CreateMovement {
                badge: badge.to_string(),
                delta,
                balance_after: new_balance,
                reason,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(badge, delta, new_balance, "Balance adjusted");

        Ok(Some((collaborator, movement)))
    }
}
