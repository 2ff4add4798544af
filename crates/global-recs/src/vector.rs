//! Sparse score vector
//!
//! Ordered mapping from item id to [`Score`] whose key set is fixed when the
//! vector is created. Every requested key is present; items without evidence
//! hold [`Score::Unscored`].

use crate::error::{RecommenderError, Result};
use crate::types::{ItemId, Score};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseScoreVector {
    entries: BTreeMap<ItemId, Score>,
}

impl SparseScoreVector {
    /// Create a vector over `domain` with every entry unscored
    pub(crate) fn with_domain<I>(domain: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            entries: domain.into_iter().map(|item| (item, Score::Unscored)).collect(),
        }
    }

    /// Set the score for a key already in the domain. Keys outside the domain are ignored.
    pub(crate) fn set(&mut self, item: ItemId, score: Score) {
        if let Some(slot) = self.entries.get_mut(&item) {
            *slot = score;
        }
    }

    /// Get the score for an item in the domain
    ///
    /// # Errors
    ///
    /// Returns `KeyNotInDomain` if `item` was never part of the requested universe.
    pub fn get(&self, item: ItemId) -> Result<Score> {
        self.entries
            .get(&item)
            .copied()
            .ok_or(RecommenderError::KeyNotInDomain { item })
    }

    /// Number of domain keys, unscored entries included
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, item: ItemId) -> bool {
        self.entries.contains_key(&item)
    }

    /// Domain keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Score)> + '_ {
        self.entries.iter().map(|(&item, &score)| (item, score))
    }

    /// Entries holding a finite score, in ascending key order
    pub fn scored(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.entries
            .iter()
            .filter_map(|(&item, score)| score.value().map(|v| (item, v)))
    }

    pub fn scored_len(&self) -> usize {
        self.scored().count()
    }
}
