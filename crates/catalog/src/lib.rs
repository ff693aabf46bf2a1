//! Product catalog: validation gate, in-memory store, source boundary.

pub mod catalog;
pub mod gate;
pub mod source;

pub use catalog::Catalog;
pub use gate::validate;
pub use source::CatalogSource;
