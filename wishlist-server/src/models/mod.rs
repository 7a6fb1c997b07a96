//! Domain models for wishlists and their embedded items
//!
//! Wishlists are stored as whole documents: the item sequence lives
//! inside the wishlist and items have no identity of their own.

pub mod validation;
pub mod slug;
pub mod wishlist;
pub mod item;

pub use validation::ValidationError;
pub use slug::{encode_component, slugify};
pub use wishlist::{CategoryMatch, Wishlist};
pub use item::{Item, NewItem};
