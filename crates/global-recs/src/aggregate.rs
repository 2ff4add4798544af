//! Neighbor weight aggregation
//!
//! Collects the similarity weights of basket members found in a target item's
//! neighborhood and reduces them to a single score.

use crate::types::{ItemId, Neighbor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How contributing neighbor weights become a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Sum of contributing weights
    #[default]
    SimilaritySum,
    /// Strongest contributing weight
    MaxSimilarity,
}

impl AggregationPolicy {
    /// Reduce `weights` to a score. `None` when there is nothing to aggregate.
    pub fn aggregate(&self, weights: &[f64]) -> Option<f64> {
        if weights.is_empty() {
            return None;
        }

        let score = match self {
            AggregationPolicy::SimilaritySum => weights.iter().sum(),
            AggregationPolicy::MaxSimilarity => {
                weights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            }
        };
        Some(score)
    }
}

/// Per-target accumulator of contributing neighbors.
///
/// Holds at most `limit` entries once [`finish`](Self::finish) runs, keeping
/// the strongest weights (ties by neighbor id ascending).
#[derive(Debug, Default)]
pub(crate) struct NeighborAccumulator {
    entries: Vec<Neighbor>,
}

impl NeighborAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, item: ItemId, weight: f64) {
        self.entries.push(Neighbor::new(item, weight));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Contributing weights, bounded to the strongest `limit` if given
    pub(crate) fn finish(&mut self, limit: Option<usize>) -> Vec<f64> {
        if let Some(limit) = limit {
            if self.entries.len() > limit {
                self.entries.sort_by(strongest_first);
                self.entries.truncate(limit);
            }
        }
        self.entries.iter().map(|n| n.weight).collect()
    }
}

fn strongest_first(a: &Neighbor, b: &Neighbor) -> Ordering {
    b.weight.total_cmp(&a.weight).then(a.item.cmp(&b.item))
}
