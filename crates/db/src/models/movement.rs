//! Movement ledger entry model.
//!
//! Movements are append-only: there is no update DTO and no repository
//! method that mutates or removes a row.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// One immutable ledger entry from the `movements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    /// Badge of the collaborator this movement belongs to.
    pub badge: String,
    /// Signed hour delta, never zero.
    pub delta: f64,
    /// Running balance after this movement was applied.
    pub balance_after: f64,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a movement. `balance_after` is computed by the ledger
/// adjustment, never supplied by callers.
#[derive(Debug)]
pub struct CreateMovement {
    pub badge: String,
    pub delta: f64,
    pub balance_after: f64,
    pub reason: Option<String>,
}
