pub mod downloads;
pub mod health;
pub mod resources;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /downloads/recognize          returning-user check (POST)
/// /downloads/requests           intake: shortcut or OTP issuance (POST)
/// /downloads/verify             code verification + release (POST)
/// /downloads/resend             regenerate + redeliver code (POST)
/// /downloads/leads/{id}/file    idempotent re-release (GET)
///
/// /resources/tools              published tool listing (GET)
/// /resources/articles           published article listing (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/downloads", downloads::download_router())
        .nest("/resources", resources::resource_router())
}
