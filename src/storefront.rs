//! Storefront view controller
//!
//! Owns the filter configuration and the cart as two independent aggregates.
//! Every user event maps to one method here; the product grid is pulled again
//! after each change through [`Storefront::products`].

use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::domain::aggregates::{Cart, CartLine, Product};
use crate::domain::catalog::Catalog;
use crate::domain::query::{CatalogQuery, QueryConfig};
use crate::domain::value_objects::{Facet, PriceRange, ProductId, SortKey};
use crate::{Result, StorefrontError};

#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    config: QueryConfig,
    results: CatalogQuery,
    cart: Cart,
}

/// Cart lines with their derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub item_count: u64,
    pub total: u64,
}

impl Storefront {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, config: QueryConfig::default(), results: CatalogQuery::new(), cart: Cart::new() }
    }

    /// Storefront over the built-in catalog.
    pub fn seeded() -> Result<Self> { Ok(Self::new(Arc::new(Catalog::seeded()?))) }

    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn config(&self) -> &QueryConfig { &self.config }
    pub fn cart(&self) -> &Cart { &self.cart }

    /// Filtered, sorted products for the current configuration.
    pub fn products(&mut self) -> &[Product] { self.results.run(&self.catalog, &self.config) }

    pub fn set_search_text(&mut self, text: impl Into<String>) { self.config.search_text = text.into(); }
    pub fn set_category(&mut self, category: Facet) { self.config.category = category; }
    pub fn set_brand(&mut self, brand: Facet) { self.config.brand = brand; }
    pub fn set_price_range(&mut self, range: PriceRange) { self.config.price_range = range; }
    pub fn set_sort_key(&mut self, key: SortKey) { self.config.sort_key = key; }

    pub fn replace_config(&mut self, config: QueryConfig) {
        debug!(?config, "filters updated");
        self.config = config;
    }

    pub fn reset_filters(&mut self) {
        debug!("filters reset");
        self.config = QueryConfig::default();
    }

    /// Adds one unit of a catalog product. Out-of-stock products are refused here,
    /// the cart itself has no notion of stock.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<()> {
        let product = self.catalog.find(id).ok_or(StorefrontError::UnknownProduct(id))?;
        if !product.is_in_stock() {
            warn!(product_id = %id, "refused to add out-of-stock product");
            return Err(StorefrontError::OutOfStock(id));
        }
        self.cart.add_item(product);
        info!(product_id = %id, item_count = self.cart.item_count(), total = self.cart.total(), "added to cart");
        Ok(())
    }

    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(id, quantity);
        if changed {
            info!(product_id = %id, quantity, total = self.cart.total(), "cart quantity updated");
        } else {
            debug!(product_id = %id, "quantity update ignored, not in cart");
        }
        changed
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed { info!(product_id = %id, total = self.cart.total(), "removed from cart"); }
        removed
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary { items: self.cart.items().to_vec(), item_count: self.cart.item_count(), total: self.cart.total() }
    }
}
