//! Document store layer - connection and wishlist repositories
//!
//! # Design Principles
//!
//! - One wishlist is one document; items are embedded, never addressed alone
//! - Appends are single-document updates, atomic in the store
//! - Lookups return the first match in insertion order (ids may repeat)
//! - Connection is established lazily and reused for the process lifetime

pub mod memory;
pub mod pool;
pub mod repos;

use async_trait::async_trait;

use crate::models::{CategoryMatch, Item, Wishlist};

pub use memory::MemoryWishlistStore;
pub use pool::create_lazy_pool;
pub use repos::PgWishlistStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn wishlist_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: "wishlist",
            id: id.to_owned(),
        }
    }
}

/// Operations against the wishlist collection.
///
/// Lookups are keyed by generated id or by exact (case-sensitive) title,
/// depending on the caller.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Insert a new wishlist with no items. The id is derived from the
    /// title and may collide with an existing wishlist's id.
    async fn create(&self, title: &str, description: &str) -> Result<Wishlist, DbError>;

    /// First wishlist whose id matches.
    async fn find_by_id(&self, id: &str) -> Result<Wishlist, DbError>;

    /// First wishlist whose title matches exactly.
    async fn find_by_title(&self, title: &str) -> Result<Wishlist, DbError>;

    /// Append one item to the end of the first wishlist with this id.
    async fn append_item(&self, id: &str, item: Item) -> Result<(), DbError>;

    /// Remove the first wishlist with this id.
    async fn delete_by_id(&self, id: &str) -> Result<(), DbError>;

    /// Remove every wishlist, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, DbError>;

    /// Every item across all wishlists whose category equals `category`.
    async fn search_by_category(&self, category: &str) -> Result<Vec<CategoryMatch>, DbError>;
}
