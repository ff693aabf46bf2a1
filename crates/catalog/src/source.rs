//! Catalog source boundary.

use lavka_core::Product;

/// External provider of raw product records (e.g. the storefront backend).
///
/// Implementations live outside the core; the core applies the catalog gate
/// to whatever they return, so a source is free to hand back unvalidated
/// records as-is.
pub trait CatalogSource {
    type Error: core::fmt::Debug;

    fn fetch_products(&self) -> Result<Vec<Product>, Self::Error>;
}
