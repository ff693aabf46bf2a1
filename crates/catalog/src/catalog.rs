//! In-memory product catalog.

use lavka_core::{Product, ProductId};

use crate::gate;
use crate::source::CatalogSource;

/// Local store of validated products.
///
/// `ingest` replaces the previous contents wholesale: the catalog always
/// mirrors the latest fetch, filtered through the gate.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a batch of raw records, replacing the current
    /// contents. Invalid entries are dropped, not surfaced as errors.
    /// Returns the number of products kept.
    pub fn ingest(&mut self, raw: Vec<Product>) -> usize {
        let total = raw.len();
        self.products = raw
            .into_iter()
            .filter(|p| {
                let ok = gate::validate(p);
                if !ok {
                    tracing::warn!(product_id = %p.id, title = %p.title, "invalid product dropped at ingest");
                }
                ok
            })
            .collect();

        tracing::info!(kept = self.products.len(), total, "catalog ingested");
        self.products.len()
    }

    /// Fetch from the source and ingest the result.
    pub fn refresh<S: CatalogSource>(&mut self, source: &S) -> Result<usize, S::Error> {
        let raw = source.fetch_products()?;
        Ok(self.ingest(raw))
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
