//! Wishlist documents and category search rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Item;

/// A named, described collection of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    /// Slug derived from the title; not unique.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Insertion order.
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
}

impl Wishlist {
    /// Sum of converted prices.
    ///
    /// Items are summed as-is even when their currencies differ.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.converted_price).sum()
    }

    /// Currency label for the whole list, taken from the first item.
    pub fn display_currency(&self) -> Option<&str> {
        self.items.first().map(|item| item.currency.as_str())
    }
}

/// One item matched by a category search, tagged with its wishlist's title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatch {
    pub wishlist_title: String,
    pub name: String,
    /// Converted price of the item.
    pub price: f64,
    pub store: String,
    pub category: String,
    pub currency: String,
    pub image_path: Option<String>,
}

impl CategoryMatch {
    pub fn new(wishlist_title: &str, item: &Item) -> Self {
        Self {
            wishlist_title: wishlist_title.to_owned(),
            name: item.name.clone(),
            price: item.converted_price,
            store: item.store.clone(),
            category: item.category.clone(),
            currency: item.currency.clone(),
            image_path: item.image_path.clone(),
        }
    }
}
