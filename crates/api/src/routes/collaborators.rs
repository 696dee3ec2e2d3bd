//! Route definitions for the `/collaborators` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::collaborators;
use crate::state::AppState;

/// Routes mounted at `/collaborators`.
///
/// ```text
/// GET   /                       -> list (optionally ?q=)
/// POST  /                       -> create (requires createCollaborator)
/// GET   /by-access-code         -> by_access_code (public)
/// GET   /{badge}/movements      -> movements (?order=asc|desc)
/// POST  /{badge}/hours          -> adjust_hours (requires postHours)
/// PATCH /{badge}/access-code    -> change_access_code (requires changeAccessCode)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collaborators::list).post(collaborators::create))
        .route("/by-access-code", get(collaborators::by_access_code))
        .route("/{badge}/movements", get(collaborators::movements))
        .route("/{badge}/hours", post(collaborators::adjust_hours))
        .route(
            "/{badge}/access-code",
            patch(collaborators::change_access_code),
        )
}
