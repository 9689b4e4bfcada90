//! Product Aggregate

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;
use crate::domain::value_objects::{Price, ProductId, Rating};

/// Immutable catalog entry. Fields are read through accessors only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_price: Option<Price>,
    category: String,
    brand: String,
    rating: Rating,
    in_stock: bool,
}

impl Product {
    pub fn builder(id: u32, name: impl Into<String>, price: u64) -> ProductBuilder {
        ProductBuilder {
            id: ProductId::new(id), name: name.into(), price: Price::new(price), original_price: None,
            category: String::new(), brand: String::new(), rating: Rating::default(), in_stock: true,
        }
    }

    pub fn id(&self) -> ProductId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> Price { self.price }
    pub fn original_price(&self) -> Option<Price> { self.original_price }
    pub fn category(&self) -> &str { &self.category }
    pub fn brand(&self) -> &str { &self.brand }
    pub fn rating(&self) -> Rating { self.rating }
    pub fn is_in_stock(&self) -> bool { self.in_stock }

    /// Markdown against the original price, rounded to the nearest whole percent (halves up).
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?.amount();
        if original == 0 { return None; }
        let ratio = Decimal::from(self.price.amount()) / Decimal::from(original);
        ((Decimal::ONE - ratio) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
    }
}

/// Validating constructor for [`Product`].
#[derive(Clone, Debug)]
pub struct ProductBuilder {
    id: ProductId,
    name: String,
    price: Price,
    original_price: Option<Price>,
    category: String,
    brand: String,
    rating: Rating,
    in_stock: bool,
}

impl ProductBuilder {
    pub fn original_price(mut self, price: u64) -> Self { self.original_price = Some(Price::new(price)); self }
    pub fn category(mut self, category: impl Into<String>) -> Self { self.category = category.into(); self }
    pub fn brand(mut self, brand: impl Into<String>) -> Self { self.brand = brand.into(); self }
    pub fn rating(mut self, rating: Rating) -> Self { self.rating = rating; self }
    pub fn in_stock(mut self, in_stock: bool) -> Self { self.in_stock = in_stock; self }

    pub fn build(self) -> Result<Product, ProductError> {
        if self.name.trim().is_empty() { return Err(ProductError::MissingName(self.id)); }
        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(ProductError::OriginalBelowPrice { id: self.id, price: self.price, original });
            }
        }
        Ok(Product {
            id: self.id, name: self.name, price: self.price, original_price: self.original_price,
            category: self.category, brand: self.brand, rating: self.rating, in_stock: self.in_stock,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("product {0} has no name")]
    MissingName(ProductId),
    #[error("product {id}: original price {original} is below current price {price}")]
    OriginalBelowPrice { id: ProductId, price: Price, original: Price },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_build() {
        let p = Product::builder(1, "Premium Кроссовки", 8900)
            .original_price(12900).category("Обувь").brand("Nike")
            .rating(Rating::from_tenths(48).unwrap()).build().unwrap();
        assert_eq!(p.name(), "Premium Кроссовки");
        assert_eq!(p.price(), Price::new(8900));
        assert!(p.is_in_stock());
    }

    #[test]
    fn test_original_price_must_not_be_lower() {
        let err = Product::builder(7, "Cheap", 500).original_price(400).build().unwrap_err();
        assert!(matches!(err, ProductError::OriginalBelowPrice { .. }));
        assert!(Product::builder(8, "Same", 500).original_price(500).build().is_ok());
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(Product::builder(9, "  ", 1).build(), Err(ProductError::MissingName(ProductId::new(9))));
    }

    #[test]
    fn test_discount_percent() {
        let sneakers = Product::builder(1, "Sneakers", 8900).original_price(12900).build().unwrap();
        assert_eq!(sneakers.discount_percent(), Some(31));
        let tee = Product::builder(6, "Tee", 2900).original_price(3900).build().unwrap();
        assert_eq!(tee.discount_percent(), Some(26));
        let plain = Product::builder(2, "Headphones", 15900).build().unwrap();
        assert_eq!(plain.discount_percent(), None);
    }

    #[test]
    fn test_discount_percent_rounds_halves_up() {
        let p = Product::builder(1, "X", 175).original_price(200).build().unwrap();
        assert_eq!(p.discount_percent(), Some(13));
        let p = Product::builder(2, "Y", 75).original_price(200).build().unwrap();
        assert_eq!(p.discount_percent(), Some(63));
    }

    #[test]
    fn test_serialized_shape() {
        let p = Product::builder(4, "Смарт-часы", 25900).in_stock(false).build().unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["inStock"], false);
        assert!(json.get("originalPrice").is_none());
    }
}
