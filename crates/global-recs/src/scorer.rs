//! Global item scorer
//!
//! Scores a universe of items against a basket of reference items using a
//! [`SimilarityModel`]. For each requested item, basket members found in its
//! neighborhood contribute their similarity weights; items with too few
//! contributors are left [`Score::Unscored`].

use crate::aggregate::NeighborAccumulator;
use crate::config::ScorerConfig;
use crate::error::{RecommenderError, Result};
use crate::model::SimilarityModel;
use crate::types::{ItemSet, Score};
use crate::vector::SparseScoreVector;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Scores items against a basket without reference to any user
pub trait GlobalItemScorer: Send + Sync {
    /// Score every item in `items` against `basket`.
    ///
    /// The returned vector's domain is exactly `items`.
    fn global_score(&self, basket: &ItemSet, items: &ItemSet) -> Result<SparseScoreVector>;
}

/// Item-item neighborhood scorer
pub struct ItemItemGlobalScorer<M> {
    model: Arc<M>,
    config: ScorerConfig,
}

impl<M: SimilarityModel> ItemItemGlobalScorer<M> {
    pub fn new(model: Arc<M>) -> Self {
        Self {
            model,
            config: ScorerConfig::default(),
        }
    }

    /// Replace the scorer configuration after validating it
    pub fn with_config(mut self, config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn model(&self) -> &Arc<M> {
        &self.model
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }
}

impl<M: SimilarityModel> GlobalItemScorer for ItemItemGlobalScorer<M> {
    #[instrument(skip_all, fields(basket = basket.len(), items = items.len()))]
    fn global_score(&self, basket: &ItemSet, items: &ItemSet) -> Result<SparseScoreVector> {
        if basket.is_empty() && self.config.require_nonempty_basket {
            tracing::warn!("Rejecting empty basket");
            return Err(RecommenderError::InvalidBasket(
                "at least one reference item is required".to_string(),
            ));
        }

        let mut scores = SparseScoreVector::with_domain(items.iter().copied());
        if items.is_empty() || basket.is_empty() {
            return Ok(scores);
        }

        let mut acc = NeighborAccumulator::with_capacity(basket.len());
        let mut scored = 0usize;

        for &item in items {
            acc.clear();
            for neighbor in self.model.neighbors(item) {
                if basket.contains(&neighbor.item) {
                    acc.push(neighbor.item, neighbor.weight);
                }
            }

            if acc.len() < self.config.min_neighbors {
                continue;
            }

            let weights = acc.finish(self.config.max_neighbors);
            let score = Score::from(self.config.aggregation.aggregate(&weights));
            if score.is_scored() {
                scored += 1;
            }
            scores.set(item, score);
        }

        debug!(scored, unscored = items.len() - scored, "Scored item universe");
        Ok(scores)
    }
}
