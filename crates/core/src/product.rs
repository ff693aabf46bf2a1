//! Product value object.

use serde::{Deserialize, Serialize};

use crate::id::ProductId;
use crate::value_object::ValueObject;

/// A catalog product.
///
/// Products are created once from the external catalog source and never
/// mutated afterwards; equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Price in smallest currency unit. `None` means "priceless": the item
    /// is not for sale and purchase actions must stay disabled for it.
    pub price: Option<u64>,
    pub category: String,
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Option<u64>,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            price,
            category: category.into(),
            image: image.into(),
        }
    }

    /// A priceless product cannot be purchased.
    pub fn is_priceless(&self) -> bool {
        self.price.is_none()
    }
}

impl ValueObject for Product {}
