//! Aggregates module
pub mod product;
pub mod cart;

pub use product::{Product, ProductBuilder, ProductError};
pub use cart::{Cart, CartLine};
