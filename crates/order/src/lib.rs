//! Progressive order accumulation with a completeness gate.

pub mod builder;

pub use builder::{CompletedOrder, OrderBuilder};
