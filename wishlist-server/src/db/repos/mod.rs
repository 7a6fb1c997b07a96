//! Repository implementations for database access

pub mod wishlists;

pub use wishlists::PgWishlistStore;
