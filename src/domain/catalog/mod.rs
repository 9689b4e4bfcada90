//! Fixed product catalog

use std::collections::HashSet;
use thiserror::Error;
use crate::domain::aggregates::{Product, ProductError};
use crate::domain::value_objects::{ProductId, Rating, RatingError};

/// Ordered, immutable product list. Order is the curated "popular" order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id()) { return Err(CatalogError::DuplicateId(p.id())); }
        }
        Ok(Self { products })
    }

    /// The storefront's hard-coded assortment.
    pub fn seeded() -> Result<Self, CatalogError> {
        let products = vec![
            Product::builder(1, "Premium Кроссовки", 8900).original_price(12900)
                .category("Обувь").brand("Nike").rating(Rating::from_tenths(48)?).build()?,
            Product::builder(2, "Беспроводные Наушники", 15900)
                .category("Электроника").brand("Sony").rating(Rating::from_tenths(49)?).build()?,
            Product::builder(3, "Стильный Рюкзак", 6900).original_price(9900)
                .category("Аксессуары").brand("Adidas").rating(Rating::from_tenths(46)?).build()?,
            Product::builder(4, "Смарт-часы", 25900)
                .category("Электроника").brand("Apple").rating(Rating::from_tenths(47)?).in_stock(false).build()?,
            Product::builder(5, "Куртка спортивная", 12900)
                .category("Одежда").brand("Puma").rating(Rating::from_tenths(45)?).build()?,
            Product::builder(6, "Футболка базовая", 2900).original_price(3900)
                .category("Одежда").brand("Uniqlo").rating(Rating::from_tenths(43)?).build()?,
        ];
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }
    pub fn find(&self, id: ProductId) -> Option<&Product> { self.products.iter().find(|p| p.id() == id) }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> { distinct(self.products.iter().map(Product::category)) }

    /// Distinct brands in order of first appearance.
    pub fn brands(&self) -> Vec<&str> { distinct(self.products.iter().map(Product::brand)) }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Rating(#[from] RatingError),
}
