//! Global item recommender
//!
//! Turns basket scores into a ranked, filtered and size-bounded list of items.
//! Every call shape (single item or basket, with or without a limit, candidate
//! set or exclude set) is a [`GlobalRecommendRequest`] with some fields left at
//! their defaults:
//!
//! - candidates: every item known to the similarity model
//! - excludes: the basket itself
//! - limit: the configured default (unbounded unless configured otherwise)
//!
//! Algorithm:
//! 1. Resolve candidates and excludes
//! 2. Score the full candidate set against the basket
//! 3. Keep scored candidates that are not excluded
//! 4. Sort by score descending, ties by item id ascending
//! 5. Truncate to the limit

use crate::config::{GlobalRecsConfig, RecommenderConfig};
use crate::error::Result;
use crate::model::SimilarityModel;
use crate::scorer::{GlobalItemScorer, ItemItemGlobalScorer};
use crate::types::{ItemId, ItemSet, ScoredItem};
use crate::vector::SparseScoreVector;
use ordered_float::NotNan;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parameters of a global recommendation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalRecommendRequest {
    basket: ItemSet,
    limit: Option<i64>,
    candidates: Option<ItemSet>,
    excludes: Option<ItemSet>,
}

impl GlobalRecommendRequest {
    pub fn for_basket<I>(basket: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            basket: basket.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Single-item basket
    pub fn for_item(item: ItemId) -> Self {
        Self::for_basket([item])
    }

    /// Maximum number of results; any negative value means unbounded
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Restrict scoring and results to these items
    pub fn candidates<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.candidates = Some(candidates.into_iter().collect());
        self
    }

    /// Items never returned. An empty set disables the default basket exclusion.
    pub fn excludes<I>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.excludes = Some(excludes.into_iter().collect());
        self
    }

    pub fn basket(&self) -> &ItemSet {
        &self.basket
    }
}

/// Recommends items for a basket without reference to any user
pub trait GlobalItemRecommender: Send + Sync {
    /// Ranked recommendations with their scores
    fn global_recommend_scored(&self, request: &GlobalRecommendRequest)
        -> Result<Vec<ScoredItem>>;

    /// Ranked recommended item ids
    fn global_recommend(&self, request: &GlobalRecommendRequest) -> Result<Vec<ItemId>> {
        Ok(self
            .global_recommend_scored(request)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }
}

/// Item-item recommender over a [`SimilarityModel`]
pub struct ItemItemGlobalRecommender<M> {
    scorer: ItemItemGlobalScorer<M>,
    config: RecommenderConfig,
}

impl<M: SimilarityModel> ItemItemGlobalRecommender<M> {
    pub fn new(scorer: ItemItemGlobalScorer<M>) -> Self {
        Self {
            scorer,
            config: RecommenderConfig::default(),
        }
    }

    /// Build scorer and recommender from a full configuration
    pub fn from_config(model: Arc<M>, config: &GlobalRecsConfig) -> Result<Self> {
        let scorer = ItemItemGlobalScorer::new(model).with_config(config.scorer.clone())?;
        Ok(Self::new(scorer).with_config(config.recommender.clone()))
    }

    pub fn with_config(mut self, config: RecommenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scorer(&self) -> &ItemItemGlobalScorer<M> {
        &self.scorer
    }

    fn resolve_limit(&self, request: &GlobalRecommendRequest) -> Option<usize> {
        let limit = request.limit.unwrap_or(self.config.default_limit);
        usize::try_from(limit).ok()
    }
}

impl<M: SimilarityModel> GlobalItemRecommender for ItemItemGlobalRecommender<M> {
    #[instrument(skip_all, fields(basket = request.basket.len()))]
    fn global_recommend_scored(
        &self,
        request: &GlobalRecommendRequest,
    ) -> Result<Vec<ScoredItem>> {
        let universe = request
            .candidates
            .as_ref()
            .unwrap_or_else(|| self.scorer.model().all_items());
        let excludes = request.excludes.as_ref().unwrap_or(&request.basket);
        let limit = self.resolve_limit(request);

        let scores = self.scorer.global_score(&request.basket, universe)?;
        let ranked = rank(&scores, excludes, limit);

        debug!(
            universe = universe.len(),
            excludes = excludes.len(),
            limit = ?limit,
            returned = ranked.len(),
            "Generated global recommendations"
        );

        Ok(ranked)
    }
}

/// Rank scored, non-excluded entries of `scores`, keeping at most `limit`
fn rank(scores: &SparseScoreVector, excludes: &ItemSet, limit: Option<usize>) -> Vec<ScoredItem> {
    if limit == Some(0) {
        return Vec::new();
    }

    let mut ranked: Vec<(NotNan<f64>, ItemId)> = scores
        .scored()
        .filter(|(item, _)| !excludes.contains(item))
        .filter_map(|(item, score)| NotNan::new(score).ok().map(|s| (s, item)))
        .collect();

    if let Some(n) = limit {
        if n < ranked.len() {
            ranked.select_nth_unstable_by(n - 1, by_rank);
            ranked.truncate(n);
        }
    }
    ranked.sort_unstable_by(by_rank);

    ranked
        .into_iter()
        .map(|(score, item)| ScoredItem {
            item,
            score: score.into_inner(),
        })
        .collect()
}

/// Score descending, then item id ascending
fn by_rank(a: &(NotNan<f64>, ItemId), b: &(NotNan<f64>, ItemId)) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Score;

    fn vector(entries: &[(ItemId, Option<f64>)]) -> SparseScoreVector {
        let mut v = SparseScoreVector::with_domain(entries.iter().map(|(i, _)| *i));
        for &(item, score) in entries {
            v.set(item, Score::from(score));
        }
        v
    }

    fn ids(ranked: &[ScoredItem]) -> Vec<ItemId> {
        ranked.iter().map(|s| s.item).collect()
    }

    #[test]
    fn test_rank_orders_by_score_then_id() {
        let scores = vector(&[(4, Some(0.5)), (2, Some(0.9)), (3, Some(0.5)), (1, None)]);
        let ranked = rank(&scores, &ItemSet::new(), None);
        assert_eq!(ids(&ranked), vec![2, 3, 4]);
        assert_eq!(ranked[0].score, 0.9);
    }

    #[test]
    fn test_rank_applies_excludes() {
        let scores = vector(&[(1, Some(2.0)), (2, Some(1.0))]);
        let excludes: ItemSet = [1].into_iter().collect();
        assert_eq!(ids(&rank(&scores, &excludes, None)), vec![2]);
    }

    #[test]
    fn test_rank_limit_is_prefix() {
        let scores = vector(&[
            (1, Some(0.1)),
            (2, Some(0.7)),
            (3, Some(0.7)),
            (4, Some(0.3)),
            (5, Some(0.9)),
        ]);
        let full = ids(&rank(&scores, &ItemSet::new(), None));
        assert_eq!(full, vec![5, 2, 3, 4, 1]);

        for n in 0..=6 {
            let bounded = ids(&rank(&scores, &ItemSet::new(), Some(n)));
            assert_eq!(bounded, full[..n.min(full.len())].to_vec());
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = GlobalRecommendRequest::for_item(7);
        assert_eq!(request.basket().iter().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(request.limit, None);
        assert_eq!(request.candidates, None);
        assert_eq!(request.excludes, None);
    }

    #[test]
    fn test_request_builder() {
        let request = GlobalRecommendRequest::for_basket([3, 1, 3])
            .limit(5)
            .candidates([4, 5])
            .excludes(Vec::new());
        assert_eq!(request.basket().len(), 2);
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.candidates, Some([4, 5].into_iter().collect()));
        assert_eq!(request.excludes, Some(ItemSet::new()));
    }
}
