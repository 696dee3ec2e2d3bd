//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The one multi-table write
//! path, [`LedgerRepo::adjust`], runs in its own transaction.

pub mod admin_repo;
pub mod collaborator_repo;
pub mod ledger_repo;
pub mod movement_repo;
pub mod session_repo;

pub use admin_repo::AdminRepo;
pub use collaborator_repo::{AccessCodeUpdate, CollaboratorRepo};
pub use ledger_repo::LedgerRepo;
pub use movement_repo::{MovementOrder, MovementRepo};
pub use session_repo::SessionRepo;
