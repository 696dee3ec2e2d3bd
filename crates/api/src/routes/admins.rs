//! Route definitions for the `/admins` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admins;
use crate::state::AppState;

/// Routes mounted at `/admins`.
///
/// ```text
/// GET  / -> list (requires auth)
/// POST / -> create (requires createAdmin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(admins::list).post(admins::create))
}
