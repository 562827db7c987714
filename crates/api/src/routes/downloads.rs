//! Route definitions for the OTP-gated download workflow.
//!
//! Mounted by `api_routes()` under `/downloads`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::downloads;
use crate::state::AppState;

/// Download gate routes.
///
/// ```text
/// POST   /recognize          -> recognize
/// POST   /requests           -> submit
/// POST   /verify             -> verify
/// POST   /resend             -> resend
/// GET    /leads/{id}/file    -> release
/// ```
pub fn download_router() -> Router<AppState> {
    Router::new()
        .route("/recognize", post(downloads::recognize))
        .route("/requests", post(downloads::submit))
        .route("/verify", post(downloads::verify))
        .route("/resend", post(downloads::resend))
        .route("/leads/{id}/file", get(downloads::release))
}
