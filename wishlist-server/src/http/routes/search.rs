//! Category search endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views;

/// Category search form body
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

/// GET /searchByCategory
async fn search_form() -> Html<String> {
    views::search_form()
}

/// POST /processSearchByCategory - exact, case-sensitive category match
async fn search_by_category(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CategoryForm>,
) -> Result<Html<String>, ApiError> {
    let matches = state.store.search_by_category(&form.category_name).await?;
    tracing::debug!(category = %form.category_name, count = matches.len(), "Category search");
    Ok(views::search_result(&form.category_name, &matches))
}

/// Search routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/searchByCategory", get(search_form))
        .route("/processSearchByCategory", post(search_by_category))
}
