//! wishlist-server: wishlist web application
//!
//! Users create named wishlists, add items (optionally with an image and
//! a display currency), view totals, search items by category and delete
//! wishlists. Pages are rendered server-side; wishlists are stored as
//! documents with their items embedded.

pub mod currency;
pub mod db;
pub mod http;
pub mod models;
pub mod uploads;

pub use currency::{ExchangeRateClient, FixedRates, RateProvider};
pub use db::{DbError, MemoryWishlistStore, PgWishlistStore, WishlistStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use uploads::UploadStore;
