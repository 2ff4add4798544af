//! Item-item similarity model
//!
//! The scorer consumes similarity data through the [`SimilarityModel`] trait.
//! [`ItemSimilarityIndex`] is an in-memory implementation built from
//! precomputed `(item, neighbor, weight)` triples.

use crate::error::{RecommenderError, Result};
use crate::types::{ItemId, ItemSet, Neighbor};
use std::collections::HashMap;

/// Read-only source of item neighborhoods.
///
/// Implementations must return the same neighborhood for the same item for
/// the lifetime of the model, with finite weights.
pub trait SimilarityModel: Send + Sync {
    /// Neighborhood of `item`, strongest first. Empty for unknown items.
    fn neighbors(&self, item: ItemId) -> &[Neighbor];

    /// Every item the model knows about
    fn all_items(&self) -> &ItemSet;
}

/// In-memory neighborhood index
#[derive(Debug, Clone, Default)]
pub struct ItemSimilarityIndex {
    neighborhoods: HashMap<ItemId, Vec<Neighbor>>,
    items: ItemSet,
}

impl ItemSimilarityIndex {
    pub fn builder() -> ItemSimilarityIndexBuilder {
        ItemSimilarityIndexBuilder::default()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Total number of stored (item, neighbor) pairs
    pub fn num_pairs(&self) -> usize {
        self.neighborhoods.values().map(Vec::len).sum()
    }
}

impl SimilarityModel for ItemSimilarityIndex {
    fn neighbors(&self, item: ItemId) -> &[Neighbor] {
        self.neighborhoods
            .get(&item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn all_items(&self) -> &ItemSet {
        &self.items
    }
}

/// Builder for [`ItemSimilarityIndex`]
#[derive(Debug, Clone, Default)]
pub struct ItemSimilarityIndexBuilder {
    pairs: HashMap<ItemId, HashMap<ItemId, f64>>,
    items: ItemSet,
    max_neighbors: Option<usize>,
}

impl ItemSimilarityIndexBuilder {
    /// Keep at most `k` neighbors per item
    pub fn max_neighbors(mut self, k: usize) -> Self {
        self.max_neighbors = Some(k);
        self
    }

    /// Register an item that may have no neighbors
    pub fn item(mut self, item: ItemId) -> Self {
        self.items.insert(item);
        self
    }

    /// Add a directed similarity `item -> neighbor`.
    ///
    /// Self-pairs are dropped; a repeated pair replaces the earlier weight.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` if `weight` is NaN or infinite.
    pub fn neighbor(mut self, item: ItemId, neighbor: ItemId, weight: f64) -> Result<Self> {
        self.insert(item, neighbor, weight)?;
        Ok(self)
    }

    /// Add a similarity in both directions
    pub fn symmetric(mut self, a: ItemId, b: ItemId, weight: f64) -> Result<Self> {
        self.insert(a, b, weight)?;
        self.insert(b, a, weight)?;
        Ok(self)
    }

    fn insert(&mut self, item: ItemId, neighbor: ItemId, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            tracing::warn!(item, neighbor, weight, "Rejecting non-finite similarity");
            return Err(RecommenderError::InvalidWeight {
                item,
                neighbor,
                weight,
            });
        }

        self.items.insert(item);
        self.items.insert(neighbor);

        if item != neighbor {
            self.pairs.entry(item).or_default().insert(neighbor, weight);
        }
        Ok(())
    }

    pub fn build(self) -> ItemSimilarityIndex {
        let max_neighbors = self.max_neighbors;
        let neighborhoods: HashMap<ItemId, Vec<Neighbor>> = self
            .pairs
            .into_iter()
            .map(|(item, row)| {
                let mut neighbors: Vec<Neighbor> = row
                    .into_iter()
                    .map(|(other, weight)| Neighbor::new(other, weight))
                    .collect();
                neighbors.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.item.cmp(&b.item)));
                if let Some(k) = max_neighbors {
                    neighbors.truncate(k);
                }
                (item, neighbors)
            })
            .collect();

        let index = ItemSimilarityIndex {
            neighborhoods,
            items: self.items,
        };

        tracing::info!(
            items = index.num_items(),
            pairs = index.num_pairs(),
            "Built item similarity index"
        );

        index
    }
}
