//! Route handlers organized by page group

pub mod wishlists;
pub mod items;
pub mod totals;
pub mod search;

use serde::Deserialize;

/// Body of the forms that name one wishlist (by title or by id,
/// depending on the endpoint).
#[derive(Debug, Deserialize)]
pub struct WishlistNameForm {
    #[serde(rename = "wishlistName")]
    pub wishlist_name: String,
}
