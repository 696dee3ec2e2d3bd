//! Request handlers, one module per resource.

pub mod admins;
pub mod auth;
pub mod collaborators;
