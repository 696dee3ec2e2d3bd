//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login               -> login
/// POST /refresh             -> refresh
/// POST /logout              -> logout (requires auth)
/// POST /collaborator-login  -> collaborator_login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/collaborator-login", post(auth::collaborator_login))
}
