//! Wishlist items

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// An item embedded in a wishlist.
///
/// Items are appended to the end of the wishlist's sequence and are never
/// edited or removed individually. Field names follow the stored document
/// layout (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub store: String,
    /// Price exactly as submitted, in USD.
    pub original_price: String,
    /// Price in `currency` after conversion.
    pub converted_price: f64,
    pub category: String,
    pub priority: String,
    pub currency: String,
    /// Human-readable conversion note, empty for USD items.
    #[serde(default)]
    pub exchange_info: String,
    /// Web path of the uploaded image, if any.
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Item fields as submitted through the add-item form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: String,
    pub store: String,
    pub category: String,
    pub priority: String,
    pub currency: String,
}

impl NewItem {
    /// Set a text field by its form name. Unknown fields are ignored.
    pub fn set_field(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "price" => self.price = value,
            "store" => self.store = value,
            "category" => self.category = value,
            "priority" => self.priority = value,
            "currency" => self.currency = value,
            _ => {}
        }
    }

    /// Parse the submitted price as a USD amount.
    pub fn amount(&self) -> Result<f64, ValidationError> {
        let trimmed = self.price.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "price" });
        }

        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(ValidationError::InvalidFormat {
                field: "price",
                reason: "must be a number",
            })
    }

    /// Build the stored item once the price has been converted.
    pub fn into_item(self, converted_price: f64, exchange_info: String, image_path: Option<String>) -> Item {
        Item {
            name: self.name,
            store: self.store,
            original_price: self.price,
            converted_price,
            category: self.category,
            priority: self.priority,
            currency: self.currency,
            exchange_info,
            image_path,
        }
    }
}
