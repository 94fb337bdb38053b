//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the in-memory
//! catalog is available to this crate's unit tests and, via the `test-utils`
//! feature, to dependent crates' integration tests.

use crate::id::ResourceId;
use crate::item::{FeatureSet, ItemCatalog};
use std::collections::HashMap;

/// In-memory [`ItemCatalog`] mapping each item to the feature flags it
/// requires (none by default).
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: HashMap<ResourceId, FeatureSet>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog over the given ids, none of them feature-gated.
    /// Panics on a malformed id; test input is expected to be valid.
    pub fn with_items(ids: &[&str]) -> Self {
        let mut catalog = Self::new();
        for id in ids {
            catalog.insert(id.parse().expect("valid test item id"));
        }
        catalog
    }

    pub fn insert(&mut self, id: ResourceId) {
        self.items.insert(id, FeatureSet::NONE);
    }

    /// Insert an item that is only enabled when `required` flags are active.
    pub fn insert_gated(&mut self, id: ResourceId, required: FeatureSet) {
        self.items.insert(id, required);
    }
}

impl ItemCatalog for MemoryCatalog {
    fn contains(&self, id: &ResourceId) -> bool {
        self.items.contains_key(id)
    }

    fn enabled(&self, id: &ResourceId, features: FeatureSet) -> bool {
        self.items
            .get(id)
            .is_some_and(|required| features.contains(*required))
    }
}
