//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthAdmin`] -- Extracts the authenticated administrator from a
//!   JWT Bearer token.
//! - [`permissions`] -- One gate extractor per capability flag; each
//!   re-resolves the administrator row from the database before allowing
//!   the request through.

pub mod auth;
pub mod permissions;
