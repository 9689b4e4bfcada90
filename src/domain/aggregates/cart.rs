//! Cart Aggregate

use serde::Serialize;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;

/// Insertion-ordered cart lines, at most one per product.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLine>,
}

/// Snapshot of a product at the time it was first added, plus a quantity of at least one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self { Self { product, quantity: 1 } }
    pub fn product(&self) -> &Product { &self.product }
    pub fn id(&self) -> ProductId { self.product.id() }
    pub fn quantity(&self) -> u32 { self.quantity }
    pub fn line_total(&self) -> u64 { self.product.price().multiply(self.quantity) }
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn items(&self) -> &[CartLine] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn line(&self, id: ProductId) -> Option<&CartLine> { self.items.iter().find(|i| i.id() == id) }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity)).sum() }

    /// Sum of `price * quantity` at the prices captured when each line was added.
    pub fn total(&self) -> u64 { self.items.iter().fold(0u64, |acc, i| acc.saturating_add(i.line_total())) }

    /// Merges into an existing line or appends a new one. Stock is not checked here.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == product.id()) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.items.push(CartLine::new(product.clone()));
        }
    }

    /// Sets a line's quantity; zero or below removes it. Returns whether a line was touched.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 { return self.remove_item(id); }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => { item.quantity = quantity; true }
            None => false,
        }
    }

    /// Drops the line for `id`. Returns whether one was present.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() != before
    }
}
