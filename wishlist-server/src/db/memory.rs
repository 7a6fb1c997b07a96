//! In-process wishlist store
//!
//! Same semantics as the PostgreSQL store (first match wins, ids may
//! repeat), kept in a `Vec` so insertion order is the natural order.
//! Used by tests and by `serve --in-memory`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::db::{DbError, WishlistStore};
use crate::models::{slugify, CategoryMatch, Item, Wishlist};

#[derive(Debug, Default)]
pub struct MemoryWishlistStore {
    wishlists: RwLock<Vec<Wishlist>>,
}

impl MemoryWishlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored wishlists, duplicates included.
    pub async fn len(&self) -> usize {
        self.wishlists.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl WishlistStore for MemoryWishlistStore {
    async fn create(&self, title: &str, description: &str) -> Result<Wishlist, DbError> {
        let wishlist = Wishlist {
            id: slugify(title),
            title: title.to_owned(),
            description: description.to_owned(),
            items: Vec::new(),
            created_at: Utc::now(),
        };
        self.wishlists.write().await.push(wishlist.clone());
        Ok(wishlist)
    }

    async fn find_by_id(&self, id: &str) -> Result<Wishlist, DbError> {
        self.wishlists
            .read()
            .await
            .iter()
            .find(|wl| wl.id == id)
            .cloned()
            .ok_or_else(|| DbError::wishlist_not_found(id))
    }

    async fn find_by_title(&self, title: &str) -> Result<Wishlist, DbError> {
        self.wishlists
            .read()
            .await
            .iter()
            .find(|wl| wl.title == title)
            .cloned()
            .ok_or_else(|| DbError::wishlist_not_found(title))
    }

    async fn append_item(&self, id: &str, item: Item) -> Result<(), DbError> {
        let mut wishlists = self.wishlists.write().await;
        let wishlist = wishlists
            .iter_mut()
            .find(|wl| wl.id == id)
            .ok_or_else(|| DbError::wishlist_not_found(id))?;
        wishlist.items.push(item);
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DbError> {
        let mut wishlists = self.wishlists.write().await;
        let index = wishlists
            .iter()
            .position(|wl| wl.id == id)
            .ok_or_else(|| DbError::wishlist_not_found(id))?;
        wishlists.remove(index);
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let mut wishlists = self.wishlists.write().await;
        let count = wishlists.len() as u64;
        wishlists.clear();
        Ok(count)
    }

    async fn search_by_category(&self, category: &str) -> Result<Vec<CategoryMatch>, DbError> {
        let wishlists = self.wishlists.read().await;
        Ok(wishlists
            .iter()
            .flat_map(|wl| {
                wl.items
                    .iter()
                    .filter(|item| item.category == category)
                    .map(|item| CategoryMatch::new(&wl.title, item))
            })
            .collect())
    }
}
