//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A safe response struct where the row carries a secret column

pub mod admin;
pub mod collaborator;
pub mod movement;
pub mod session;
