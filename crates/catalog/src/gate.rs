//! Catalog validation gate.

use lavka_core::Product;

/// Pure predicate: is this product fit for the catalog?
///
/// - Title must be non-empty after trimming.
/// - Price must be either the priceless sentinel (`None`) or positive;
///   a zero price is invalid, distinct from a priceless item.
///
/// Applied once at ingest (invalid entries are dropped) and again at
/// selection time, since a refetch may have raced in between.
pub fn validate(product: &Product) -> bool {
    let has_title = !product.title.trim().is_empty();
    let has_price = match product.price {
        None => true,
        Some(p) => p > 0,
    };
    has_title && has_price
}
