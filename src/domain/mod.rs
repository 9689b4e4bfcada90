//! Storefront domain: products, the catalog, the query engine and the cart.
pub mod aggregates;
pub mod catalog;
pub mod query;
pub mod value_objects;
