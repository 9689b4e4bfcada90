//! ShopHub Storefront
//!
//! Core of a single-page storefront view.
//!
//! ## Features
//! - Fixed product catalog with category and brand facets
//! - Memoized catalog query (search, facets, price range, sort)
//! - Ephemeral shopping cart with derived item count and total
//! - JSON surface over the view controller

use thiserror::Error;

pub mod api;
pub mod config;
pub mod domain;
pub mod storefront;

pub use domain::aggregates::{Cart, CartLine, Product, ProductError};
pub use domain::catalog::{Catalog, CatalogError};
pub use domain::query::{query, CatalogQuery, QueryConfig};
pub use domain::value_objects::{Facet, Price, PriceRange, PriceRangeError, ProductId, Rating, SortKey, SortKeyError};
pub use storefront::{CartSummary, Storefront};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Product {0} not found")]
    UnknownProduct(ProductId),

    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    #[error(transparent)]
    InvalidPriceRange(#[from] PriceRangeError),

    #[error(transparent)]
    InvalidSortKey(#[from] SortKeyError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
