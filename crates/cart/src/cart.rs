//! Cart: ordered collection of selected products, unique by product id.

use serde::{Deserialize, Serialize};

use lavka_core::{Product, ProductId, ValueObject};

/// One cart entry, wrapping exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
}

impl ValueObject for CartItem {}

/// The buyer's cart.
///
/// Invariant: no two items share a product id. Mutation happens only through
/// `add`/`remove`/`clear`; none of the operations can fail - a duplicate add
/// or an absent remove is an expected no-op, reported through the returned
/// boolean so callers can log it. The cart emits no events itself; the
/// coordinator re-broadcasts `cart:changed` after mutating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product.id == *id)
    }

    /// Insert the product unless an item with the same id is present.
    /// Returns whether an insertion occurred.
    pub fn add(&mut self, product: Product) -> bool {
        if self.has(&product.id) {
            return false;
        }
        self.items.push(CartItem { product });
        true
    }

    /// Remove the item with the given id, if present.
    /// Returns whether a removal occurred.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != *id);
        self.items.len() != before
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in stable insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Product snapshot in insertion order (for event payloads).
    pub fn products(&self) -> Vec<Product> {
        self.items.iter().map(|item| item.product.clone()).collect()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of item prices; a priceless item contributes zero.
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.product.price.unwrap_or(0))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
