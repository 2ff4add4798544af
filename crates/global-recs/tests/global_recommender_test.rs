//! Integration tests for global item-item recommendations
//!
//! The fixture model holds cosine similarities between the item columns of
//! this interaction data (all ratings 1.0):
//!
//! | user | items        |
//! |------|--------------|
//! | 1    | 1, 5         |
//! | 2    | 1, 7         |
//! | 3    | 7            |
//! | 4    | 1, 5, 7, 10  |

use anyhow::Result;
use media_gateway_global_recs::{
    GlobalItemRecommender, GlobalItemScorer, GlobalRecommendRequest, GlobalRecsConfig,
    ItemId, ItemItemGlobalRecommender, ItemItemGlobalScorer, ItemSet, ItemSimilarityIndex,
    RecommenderConfig, RecommenderError, Score, ScorerConfig,
};
use std::sync::Arc;

fn fixture_model() -> Result<Arc<ItemSimilarityIndex>> {
    let index = ItemSimilarityIndex::builder()
        .symmetric(1, 5, 2.0 / 6f64.sqrt())?
        .symmetric(1, 7, 2.0 / 3.0)?
        .symmetric(1, 10, 1.0 / 3f64.sqrt())?
        .symmetric(5, 7, 1.0 / 6f64.sqrt())?
        .symmetric(5, 10, 1.0 / 2f64.sqrt())?
        .symmetric(7, 10, 1.0 / 3f64.sqrt())?
        .build();
    Ok(Arc::new(index))
}

fn recommender() -> Result<ItemItemGlobalRecommender<ItemSimilarityIndex>> {
    Ok(ItemItemGlobalRecommender::new(ItemItemGlobalScorer::new(
        fixture_model()?,
    )))
}

fn set(items: &[ItemId]) -> ItemSet {
    items.iter().copied().collect()
}

#[test]
fn test_scorer_scores_items_near_basket() -> Result<()> {
    let scorer = ItemItemGlobalScorer::new(fixture_model()?);
    let scores = scorer.global_score(&set(&[1, 10]), &set(&[5, 10]))?;

    assert_eq!(scores.size(), 2);
    assert!(scores.get(5)?.is_scored());
    // 10 is scored through its neighbor 1
    assert!(scores.get(10)?.is_scored());
    assert!(matches!(
        scores.get(7),
        Err(RecommenderError::KeyNotInDomain { item: 7 })
    ));
    Ok(())
}

#[test]
fn test_unknown_item_is_unscored() -> Result<()> {
    let scorer = ItemItemGlobalScorer::new(fixture_model()?);
    let scores = scorer.global_score(&set(&[1]), &set(&[2, 1]))?;

    assert_eq!(scores.get(2)?, Score::Unscored);
    assert_eq!(scores.get(1)?, Score::Unscored);
    Ok(())
}

#[test]
fn test_single_item_default_shape() -> Result<()> {
    let rec = recommender()?;

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1))?;
    assert_eq!(recs, vec![5, 7, 10]);

    // item 2 is unknown to the model
    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(2))?;
    assert!(recs.is_empty());

    for item in [5, 7, 10] {
        let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(item))?;
        assert_eq!(recs.len(), 3);
        assert!(!recs.contains(&item));
    }
    Ok(())
}

#[test]
fn test_single_item_with_limit() -> Result<()> {
    let rec = recommender()?;

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1).limit(2))?;
    assert_eq!(recs, vec![5, 7]);

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(2).limit(1))?;
    assert!(recs.is_empty());

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(5).limit(3))?;
    assert_eq!(recs, vec![1, 10, 7]);
    Ok(())
}

#[test]
fn test_single_item_with_candidates() -> Result<()> {
    let rec = recommender()?;

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1).candidates(Vec::new()))?;
    assert!(recs.is_empty());

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1).candidates([1, 5]))?;
    assert_eq!(recs, vec![5]);
    Ok(())
}

#[test]
fn test_single_item_full_shape() -> Result<()> {
    let rec = recommender()?;

    let recs = rec.global_recommend(
        &GlobalRecommendRequest::for_item(1)
            .limit(1)
            .candidates(Vec::new())
            .excludes(Vec::new()),
    )?;
    assert!(recs.is_empty());

    // the basket item stays unscored even when it is not excluded
    let recs = rec.global_recommend(
        &GlobalRecommendRequest::for_item(1)
            .limit(1)
            .candidates([1, 5])
            .excludes(Vec::new()),
    )?;
    assert_eq!(recs, vec![5]);

    let recs = rec.global_recommend(
        &GlobalRecommendRequest::for_item(1)
            .limit(2)
            .candidates([1, 5])
            .excludes([5]),
    )?;
    assert!(recs.is_empty());
    Ok(())
}

#[test]
fn test_basket_with_limit() -> Result<()> {
    let rec = recommender()?;

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_basket([1, 7]).limit(-1))?;
    assert_eq!(recs, vec![5, 10]);

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_basket([1, 7]).limit(1))?;
    assert_eq!(recs, vec![5]);
    Ok(())
}

#[test]
fn test_basket_with_candidates() -> Result<()> {
    let rec = recommender()?;

    let recs =
        rec.global_recommend(&GlobalRecommendRequest::for_basket([1]).candidates([5, 10]))?;
    assert_eq!(recs, vec![5, 10]);

    let recs =
        rec.global_recommend(&GlobalRecommendRequest::for_basket([1]).candidates([5, 7, 10]))?;
    assert_eq!(recs, vec![5, 7, 10]);
    Ok(())
}

#[test]
fn test_basket_full_shape() -> Result<()> {
    let rec = recommender()?;
    let request = GlobalRecommendRequest::for_basket([5, 10]).candidates([1, 7]);

    let recs = rec.global_recommend(&request.clone().limit(1).excludes(Vec::new()))?;
    assert_eq!(recs, vec![1]);

    let recs = rec.global_recommend(&request.clone().limit(2).excludes([5]))?;
    assert_eq!(recs, vec![1, 7]);

    let recs = rec.global_recommend(&request.limit(2).excludes([5, 1]))?;
    assert_eq!(recs, vec![7]);
    Ok(())
}

#[test]
fn test_exclusion_wins_over_top_score() -> Result<()> {
    let rec = recommender()?;
    let recs = rec.global_recommend(
        &GlobalRecommendRequest::for_item(1)
            .candidates([5, 7])
            .excludes([5]),
    )?;
    assert_eq!(recs, vec![7]);
    Ok(())
}

#[test]
fn test_any_negative_limit_is_unbounded() -> Result<()> {
    let rec = recommender()?;
    let unbounded = rec.global_recommend(&GlobalRecommendRequest::for_item(5).limit(-1))?;

    for limit in [-2, -100, i64::MIN] {
        let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(5).limit(limit))?;
        assert_eq!(recs, unbounded);
    }

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(5).limit(0))?;
    assert!(recs.is_empty());

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(5).limit(50))?;
    assert_eq!(recs, unbounded);
    Ok(())
}

#[test]
fn test_scored_results_are_descending() -> Result<()> {
    let rec = recommender()?;
    let scored = rec.global_recommend_scored(&GlobalRecommendRequest::for_basket([5, 10]))?;

    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].item, 1);
    assert!(scored[0].score > scored[1].score);
    assert!((scored[0].score - (2.0 / 6f64.sqrt() + 1.0 / 3f64.sqrt())).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_configured_default_limit() -> Result<()> {
    let rec = recommender()?.with_config(RecommenderConfig { default_limit: 1 });

    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1))?;
    assert_eq!(recs, vec![5]);

    // an explicit limit overrides the default
    let recs = rec.global_recommend(&GlobalRecommendRequest::for_item(1).limit(-1))?;
    assert_eq!(recs.len(), 3);
    Ok(())
}

#[test]
fn test_from_config_requires_basket() -> Result<()> {
    let config = GlobalRecsConfig {
        scorer: ScorerConfig {
            require_nonempty_basket: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let rec = ItemItemGlobalRecommender::from_config(fixture_model()?, &config)?;

    let result = rec.global_recommend(&GlobalRecommendRequest::for_basket(Vec::new()));
    assert!(matches!(result, Err(RecommenderError::InvalidBasket(_))));
    Ok(())
}

#[test]
fn test_empty_basket_yields_nothing_by_default() -> Result<()> {
    let rec = recommender()?;
    let recs = rec.global_recommend(&GlobalRecommendRequest::for_basket(Vec::new()))?;
    assert!(recs.is_empty());
    Ok(())
}
