//! Core types shared by the scorer, recommender and similarity model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque 64-bit item identifier
pub type ItemId = i64;

/// Set of item identifiers, iterated in ascending order
pub type ItemSet = BTreeSet<ItemId>;

/// Score held by a [`SparseScoreVector`](crate::SparseScoreVector) entry.
///
/// `Unscored` marks an item that was requested but had no evidence to compute
/// a score from. It is data, not an error, and never takes part in ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Score {
    Scored(f64),
    #[default]
    Unscored,
}

impl Score {
    /// Finite score value, if any
    pub fn value(&self) -> Option<f64> {
        match *self {
            Score::Scored(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.value().is_some()
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Score::Scored(v),
            _ => Score::Unscored,
        }
    }
}

/// One entry of an item's similarity neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub item: ItemId,
    pub weight: f64,
}

impl Neighbor {
    pub fn new(item: ItemId, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// Ranked recommendation entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: ItemId,
    pub score: f64,
}
