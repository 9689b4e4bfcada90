//! Value Objects for the storefront

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound of the price slider.
pub const PRICE_SLIDER_MAX: u64 = 30_000;
/// Step of the price slider.
pub const PRICE_SLIDER_STEP: u64 = 1_000;

/// Catalog-unique product identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    pub const fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Price value object. Amounts are whole units of the single store currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const fn new(amount: u64) -> Self { Self(amount) }
    pub fn amount(&self) -> u64 { self.0 }
    pub fn multiply(&self, qty: u32) -> u64 { self.0.saturating_mul(u64::from(qty)) }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Customer rating in `[0, 5]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Rating from tenths, e.g. `48` is `4.8`.
    pub fn from_tenths(tenths: u32) -> Result<Self, RatingError> { Self::new(Decimal::new(i64::from(tenths), 1)) }

    pub fn value(&self) -> Decimal { self.0 }

    /// Number of filled stars shown next to the product.
    pub fn full_stars(&self) -> u8 { self.0.floor().to_u8().unwrap_or(0) }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingError;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Rating> for Decimal {
    fn from(rating: Rating) -> Self { rating.0 }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("rating {0} is outside 0..=5")]
    OutOfRange(Decimal),
}

/// Category or brand selection: everything, or one exact label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub const ALL: &'static str = "all";

    pub fn only(label: impl Into<String>) -> Self { Self::Only(label.into()) }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label == value,
        }
    }
}

impl From<String> for Facet {
    fn from(value: String) -> Self {
        if value == Self::ALL { Self::All } else { Self::Only(value) }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self { Self::from(value.to_string()) }
}

impl From<Facet> for String {
    fn from(facet: Facet) -> Self {
        match facet {
            Facet::All => Facet::ALL.to_string(),
            Facet::Only(label) => label,
        }
    }
}

/// Inclusive price bounds, `min <= max`. Serialized as `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct PriceRange { min: Price, max: Price }

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Result<Self, PriceRangeError> {
        if min > max { return Err(PriceRangeError::Inverted { min, max }); }
        Ok(Self { min: Price::new(min), max: Price::new(max) })
    }
    pub fn min(&self) -> Price { self.min }
    pub fn max(&self) -> Price { self.max }
    pub fn contains(&self, price: Price) -> bool { self.min <= price && price <= self.max }
}

impl Default for PriceRange {
    fn default() -> Self { Self { min: Price::ZERO, max: Price::new(PRICE_SLIDER_MAX) } }
}

impl TryFrom<(u64, u64)> for PriceRange {
    type Error = PriceRangeError;
    fn try_from((min, max): (u64, u64)) -> Result<Self, Self::Error> { Self::new(min, max) }
}

impl From<PriceRange> for (u64, u64) {
    fn from(range: PriceRange) -> Self { (range.min.amount(), range.max.amount()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceRangeError {
    #[error("price range minimum {min} exceeds maximum {max}")]
    Inverted { min: u64, max: u64 },
}

/// Display order of the product grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Catalog order. There is no computed popularity signal.
    #[default]
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "price-low", alias = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-high", alias = "price-desc")]
    PriceDesc,
    #[serde(rename = "rating", alias = "rating-desc")]
    RatingDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::RatingDesc => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-low" | "price-asc" => Ok(Self::PriceAsc),
            "price-high" | "price-desc" => Ok(Self::PriceDesc),
            "rating" | "rating-desc" => Ok(Self::RatingDesc),
            other => Err(SortKeyError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortKeyError {
    #[error("unknown sort key: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::from_tenths(50).is_ok());
        assert!(Rating::from_tenths(0).is_ok());
        assert!(Rating::from_tenths(51).is_err());
        assert!(Rating::new(Decimal::new(-1, 1)).is_err());
    }

    #[test]
    fn test_full_stars() {
        assert_eq!(Rating::from_tenths(48).unwrap().full_stars(), 4);
        assert_eq!(Rating::from_tenths(50).unwrap().full_stars(), 5);
    }

    #[test]
    fn test_price_range() {
        let range = PriceRange::new(1000, 9000).unwrap();
        assert!(range.contains(Price::new(1000)));
        assert!(range.contains(Price::new(9000)));
        assert!(!range.contains(Price::new(9001)));
        assert_eq!(PriceRange::new(5, 4), Err(PriceRangeError::Inverted { min: 5, max: 4 }));
    }

    #[test]
    fn test_price_range_serde() {
        let range: PriceRange = serde_json::from_str("[0, 30000]").unwrap();
        assert_eq!(range, PriceRange::default());
        assert!(serde_json::from_str::<PriceRange>("[10, 1]").is_err());
    }

    #[test]
    fn test_facet() {
        assert_eq!(Facet::from("all"), Facet::All);
        assert!(Facet::All.matches("Обувь"));
        assert!(Facet::only("Обувь").matches("Обувь"));
        assert!(!Facet::only("Обувь").matches("Одежда"));
        assert_eq!(serde_json::to_string(&Facet::only("Sony")).unwrap(), "\"Sony\"");
    }

    #[test]
    fn test_sort_key_names() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("rating-desc".parse::<SortKey>().unwrap(), SortKey::RatingDesc);
        assert!("newest".parse::<SortKey>().is_err());
        let key: SortKey = serde_json::from_str("\"price-desc\"").unwrap();
        assert_eq!(key, SortKey::PriceDesc);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"price-high\"");
    }
}
