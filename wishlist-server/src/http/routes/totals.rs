//! Wishlist total endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};

use super::WishlistNameForm;
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views;

/// GET /getTotalOfWishlist
async fn total_form() -> Html<String> {
    views::total_form()
}

/// POST /processGetTotal - sum of converted prices, looked up by title.
///
/// The currency label is the first item's; mixed currencies are summed as-is.
async fn get_total(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WishlistNameForm>,
) -> Result<Html<String>, ApiError> {
    let wishlist = match state.store.find_by_title(&form.wishlist_name).await {
        Ok(wishlist) => wishlist,
        Err(DbError::NotFound { .. }) => return Ok(views::not_found()),
        Err(e) => return Err(e.into()),
    };

    Ok(views::total_result(
        &form.wishlist_name,
        wishlist.total(),
        wishlist.display_currency(),
    ))
}

/// Total routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/getTotalOfWishlist", get(total_form))
        .route("/processGetTotal", post(get_total))
}
