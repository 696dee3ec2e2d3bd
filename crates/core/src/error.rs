//! Domain-level error taxonomy.
//!
//! Every failure detected at an operation boundary is one of these variants.
//! The API layer maps them onto HTTP status codes; nothing here is fatal to
//! the process and nothing is retried automatically.

/// Domain error returned by repository and handler logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by business key (badge, access code, username) found nothing.
    ///
    /// `id` is a string because the registry's business keys are strings,
    /// not database ids.
    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Malformed or missing input. Surfaced verbatim to the caller.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation on badge, access code, or username.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials. Deliberately generic so callers cannot tell an
    /// unknown username from a wrong password.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but missing the required permission flag.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected backing-store failure. Logged server-side, surfaced as a
    /// generic message.
    #[error("{0}")]
    Internal(String),
}
