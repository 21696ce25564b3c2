//! Price catalog port
//!
//! The calculator resolves line prices through this port when a line does
//! not carry its own unit-price override. Persistence adapters implement it
//! over the product/material tables; tests use the in-memory variant.

use std::collections::HashMap;

use core_kernel::{ItemId, Money};

/// Read-only lookup of catalog unit prices
pub trait PriceCatalog {
    /// Returns the catalog unit price for an item, or None if the item is unknown
    fn unit_price(&self, item_id: ItemId) -> Option<Money>;
}

/// In-memory catalog backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    prices: HashMap<ItemId, Money>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item price
    pub fn insert(&mut self, item_id: ItemId, price: Money) {
        self.prices.insert(item_id, price);
    }

    /// Builder-style registration
    pub fn with_item(mut self, item_id: ItemId, price: Money) -> Self {
        self.insert(item_id, price);
        self
    }
}

impl PriceCatalog for InMemoryCatalog {
    fn unit_price(&self, item_id: ItemId) -> Option<Money> {
        self.prices.get(&item_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_memory_lookup() {
        let item = ItemId::new();
        let catalog = InMemoryCatalog::new().with_item(item, Money::new(dec!(12.500)));

        assert_eq!(catalog.unit_price(item), Some(Money::new(dec!(12.500))));
        assert_eq!(catalog.unit_price(ItemId::new()), None);
    }
}
