//! Domain primitives shared by the timebank backend crates.
//!
//! - [`error`] -- the domain error taxonomy ([`error::CoreError`]).
//! - [`permissions`] -- the fixed-shape admin capability record.
//! - [`types`] -- common type aliases for ids and timestamps.
//! - [`validation`] -- access-code format, delta checks, balance rounding.

pub mod error;
pub mod permissions;
pub mod types;
pub mod validation;
