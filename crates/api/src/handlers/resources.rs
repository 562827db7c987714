//! Handlers for the public resource catalog listings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use ledgergate_db::repositories::ResourceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// List published tools, newest first.
pub async fn list_tools(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tools = ResourceRepo::list_tools(&state.pool).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// List published articles, newest first.
pub async fn list_articles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let articles = ResourceRepo::list_articles(&state.pool).await?;
    Ok(Json(DataResponse { data: articles }))
}
