//! Route definitions for the public resource catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::resources;
use crate::state::AppState;

/// Catalog listing routes.
///
/// ```text
/// GET /tools      -> list_tools
/// GET /articles   -> list_articles
/// ```
pub fn resource_router() -> Router<AppState> {
    Router::new()
        .route("/tools", get(resources::list_tools))
        .route("/articles", get(resources::list_articles))
}
