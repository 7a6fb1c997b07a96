//! Wishlist pages: create, revisit, delete one, delete all

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use super::WishlistNameForm;
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views;
use crate::models::{encode_component, ValidationError};

/// Create wishlist form body
#[derive(Debug, Deserialize)]
pub struct CreateWishlistForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// GET /
async fn index() -> Html<String> {
    views::index()
}

/// GET /createWishlist
async fn create_form() -> Html<String> {
    views::create_wishlist_form()
}

/// POST /createWishlist - insert, then continue to the item form
async fn create_wishlist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateWishlistForm>,
) -> Result<Redirect, ApiError> {
    if form.title.trim().is_empty() {
        return Err(ValidationError::Empty { field: "title" }.into());
    }

    let wishlist = state.store.create(&form.title, &form.description).await?;
    tracing::info!(id = %wishlist.id, title = %wishlist.title, "Created wishlist");

    Ok(Redirect::to(&format!(
        "/createWishlist/{}/addItems",
        encode_component(&wishlist.id)
    )))
}

/// GET /createWishlist/{id}/addItems
async fn add_items_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let wishlist = state.store.find_by_id(&id).await?;
    Ok(views::add_items_form(&wishlist))
}

/// GET /revisitWishlist
async fn revisit_form() -> Html<String> {
    views::revisit_form()
}

/// POST /processRevisitWishlist - items table, looked up by title
async fn revisit_wishlist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WishlistNameForm>,
) -> Result<Html<String>, ApiError> {
    match state.store.find_by_title(&form.wishlist_name).await {
        Ok(wishlist) => Ok(views::revisit_result(&wishlist)),
        Err(DbError::NotFound { .. }) => Ok(views::not_found()),
        Err(e) => Err(e.into()),
    }
}

/// POST /processDeleteWishlist - delete one, looked up by id
async fn delete_wishlist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WishlistNameForm>,
) -> Result<Html<String>, ApiError> {
    let id = form.wishlist_name;
    let wishlist = match state.store.find_by_id(&id).await {
        Ok(wishlist) => wishlist,
        Err(DbError::NotFound { .. }) => return Ok(views::not_found()),
        Err(e) => return Err(e.into()),
    };

    state.store.delete_by_id(&id).await?;
    tracing::info!(%id, title = %wishlist.title, "Deleted wishlist");

    Ok(views::wishlist_deleted(&wishlist.title))
}

/// GET /deleteAllWishlists
async fn delete_all_form() -> Html<String> {
    views::delete_all_form()
}

/// POST /processDeleteAllWishlists
async fn delete_all_wishlists(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let count = state.store.delete_all().await?;
    tracing::warn!(count, "Deleted all wishlists");
    Ok(views::all_deleted(count))
}

/// Wishlist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/createWishlist", get(create_form).post(create_wishlist))
        .route("/createWishlist/{id}/addItems", get(add_items_form))
        .route("/revisitWishlist", get(revisit_form))
        .route("/processRevisitWishlist", post(revisit_wishlist))
        .route("/processDeleteWishlist", post(delete_wishlist))
        .route("/deleteAllWishlists", get(delete_all_form))
        .route("/processDeleteAllWishlists", post(delete_all_wishlists))
}
