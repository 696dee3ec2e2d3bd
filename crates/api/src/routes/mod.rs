pub mod admins;
pub mod auth;
pub mod collaborators;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                            admin login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/collaborator-login               access-code login (public)
///
/// /collaborators                         list/search, create
/// /collaborators/by-access-code          collaborator + history (public)
/// /collaborators/{badge}/movements       ledger history
/// /collaborators/{badge}/hours           atomic hour adjustment (POST)
/// /collaborators/{badge}/access-code     change access code (PATCH)
///
/// /admins                                list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/collaborators", collaborators::router())
        .nest("/admins", admins::router())
}
