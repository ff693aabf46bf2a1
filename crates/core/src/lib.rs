//! `lavka-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod product;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use product::Product;
pub use value_object::ValueObject;
