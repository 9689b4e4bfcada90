//! Catalog query engine: filter, then stable sort.

use serde::{Deserialize, Serialize};
use crate::domain::aggregates::Product;
use crate::domain::catalog::Catalog;
use crate::domain::value_objects::{Facet, PriceRange, SortKey};

/// Filter and sort selections applied to the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    pub search_text: String,
    pub category: Facet,
    pub brand: Facet,
    pub price_range: PriceRange,
    pub sort_key: SortKey,
}

impl QueryConfig {
    /// Whether `product` passes every filter dimension. `needle` is the case-folded search text.
    fn matches(&self, product: &Product, needle: &str) -> bool {
        (needle.is_empty() || product.name().to_lowercase().contains(needle))
            && self.category.matches(product.category())
            && self.brand.matches(product.brand())
            && self.price_range.contains(product.price())
    }
}

/// Produces the display sequence for `config`. Neither argument is modified.
pub fn query(catalog: &Catalog, config: &QueryConfig) -> Vec<Product> {
    let needle = config.search_text.to_lowercase();
    let mut result: Vec<Product> = catalog.products().iter()
        .filter(|p| config.matches(p, &needle))
        .cloned()
        .collect();

    // sort_by is stable: ties keep catalog order
    match config.sort_key {
        SortKey::Popular => {}
        SortKey::PriceAsc => result.sort_by(|a, b| a.price().cmp(&b.price())),
        SortKey::PriceDesc => result.sort_by(|a, b| b.price().cmp(&a.price())),
        SortKey::RatingDesc => result.sort_by(|a, b| b.rating().cmp(&a.rating())),
    }
    result
}

/// Memoizes the last query result, keyed on the full configuration.
#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    cached: Option<(QueryConfig, Vec<Product>)>,
}

impl CatalogQuery {
    pub fn new() -> Self { Self::default() }

    pub fn run(&mut self, catalog: &Catalog, config: &QueryConfig) -> &[Product] {
        let stale = !matches!(&self.cached, Some((key, _)) if key == config);
        if stale {
            let result = query(catalog, config);
            tracing::debug!(sort = %config.sort_key, matched = result.len(), "catalog query recomputed");
            self.cached = Some((config.clone(), result));
        }
        match &self.cached {
            Some((_, result)) => result,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ProductId, Rating};

    fn ids(products: &[Product]) -> Vec<u32> { products.iter().map(|p| p.id().value()).collect() }

    fn seeded() -> Catalog { Catalog::seeded().unwrap() }

    #[test]
    fn test_default_config_returns_catalog_order() {
        let result = query(&seeded(), &QueryConfig::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_category_filter() {
        let config = QueryConfig { category: Facet::only("Электроника"), ..Default::default() };
        assert_eq!(ids(&query(&seeded(), &config)), vec![2, 4]);
    }

    #[test]
    fn test_brand_filter() {
        let config = QueryConfig { brand: Facet::only("Uniqlo"), ..Default::default() };
        assert_eq!(ids(&query(&seeded(), &config)), vec![6]);
    }

    #[test]
    fn test_price_low_sort() {
        let config = QueryConfig { sort_key: "price-low".parse().unwrap(), ..Default::default() };
        assert_eq!(ids(&query(&seeded(), &config)), vec![6, 3, 1, 5, 2, 4]);
    }

    #[test]
    fn test_price_high_and_rating_sort() {
        let catalog = seeded();
        let by_price = QueryConfig { sort_key: SortKey::PriceDesc, ..Default::default() };
        assert_eq!(ids(&query(&catalog, &by_price)), vec![4, 2, 5, 1, 3, 6]);
        let by_rating = QueryConfig { sort_key: SortKey::RatingDesc, ..Default::default() };
        assert_eq!(ids(&query(&catalog, &by_rating)), vec![2, 1, 4, 3, 5, 6]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = seeded();
        for text in ["наушники", "НАУШНИКИ", "НаУшНиКи"] {
            let config = QueryConfig { search_text: text.into(), ..Default::default() };
            assert_eq!(ids(&query(&catalog, &config)), vec![2]);
        }
    }

    #[test]
    fn test_unknown_facet_yields_empty() {
        let config = QueryConfig { category: Facet::only("Мебель"), ..Default::default() };
        assert!(query(&seeded(), &config).is_empty());
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let config = QueryConfig { price_range: PriceRange::new(2900, 8900).unwrap(), ..Default::default() };
        assert_eq!(ids(&query(&seeded(), &config)), vec![1, 3, 6]);
    }

    #[test]
    fn test_narrowing_never_grows_result() {
        let catalog = seeded();
        let mut previous = usize::MAX;
        for max in [30000, 20000, 13000, 9000, 5000, 2000, 0] {
            let config = QueryConfig { price_range: PriceRange::new(0, max).unwrap(), ..Default::default() };
            let len = query(&catalog, &config).len();
            assert!(len <= previous);
            previous = len;
        }
        let wide = QueryConfig { search_text: "а".into(), ..Default::default() };
        let narrow = QueryConfig { category: Facet::only("Одежда"), ..wide.clone() };
        assert!(query(&catalog, &narrow).len() <= query(&catalog, &wide).len());
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let rating = Rating::from_tenths(40).unwrap();
        let products = (1..=5)
            .map(|id| Product::builder(id, format!("Item {id}"), if id % 2 == 0 { 100 } else { 200 }).rating(rating).build().unwrap())
            .collect();
        let catalog = Catalog::new(products).unwrap();
        let asc = QueryConfig { sort_key: SortKey::PriceAsc, ..Default::default() };
        assert_eq!(ids(&query(&catalog, &asc)), vec![2, 4, 1, 3, 5]);
        let desc = QueryConfig { sort_key: SortKey::PriceDesc, ..Default::default() };
        assert_eq!(ids(&query(&catalog, &desc)), vec![1, 3, 5, 2, 4]);
        let by_rating = QueryConfig { sort_key: SortKey::RatingDesc, ..Default::default() };
        assert_eq!(ids(&query(&catalog, &by_rating)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_requery_is_idempotent_and_pure() {
        let catalog = seeded();
        let config = QueryConfig { search_text: "к".into(), sort_key: SortKey::PriceDesc, ..Default::default() };
        let before = (catalog.clone(), config.clone());
        assert_eq!(query(&catalog, &config), query(&catalog, &config));
        assert_eq!((catalog, config), before);
    }

    #[test]
    fn test_memoized_query_tracks_config() {
        let catalog = seeded();
        let mut memo = CatalogQuery::new();
        let mut config = QueryConfig::default();
        assert_eq!(memo.run(&catalog, &config).len(), 6);
        config.brand = Facet::only("Sony");
        assert_eq!(ids(memo.run(&catalog, &config)), vec![2]);
        assert_eq!(memo.run(&catalog, &config)[0].id(), ProductId::new(2));
        config.brand = Facet::All;
        assert_eq!(memo.run(&catalog, &config).len(), 6);
    }
}
