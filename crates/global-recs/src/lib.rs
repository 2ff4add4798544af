//! Global Item-Item Recommendations for Media Gateway
//!
//! User-agnostic recommendations: given a basket of reference items (the title
//! being viewed, a watchlist, a queue) score and rank other items by their
//! aggregate similarity to the basket using a precomputed item-item
//! similarity model.
//!
//! ## Modules
//!
//! - `types`: item ids, scores and neighborhood entries
//! - `vector`: sparse score vector over a fixed item domain
//! - `model`: similarity model trait and in-memory neighborhood index
//! - `aggregate`: neighbor weight aggregation policies
//! - `scorer`: basket scoring over an item universe
//! - `recommender`: candidate/exclude filtering, ranking and truncation
//! - `discount`: rank discounting for downstream list metrics
//! - `config`: layered configuration
//! - `observability`: structured logging setup
//! - `error`: error types
//!
//! ## Example
//!
//! ```
//! use media_gateway_global_recs::{
//!     GlobalItemRecommender, GlobalRecommendRequest, ItemItemGlobalRecommender,
//!     ItemItemGlobalScorer, ItemSimilarityIndex,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> media_gateway_global_recs::Result<()> {
//! let index = ItemSimilarityIndex::builder()
//!     .symmetric(1, 5, 0.8)?
//!     .symmetric(1, 7, 0.6)?
//!     .build();
//!
//! let recommender = ItemItemGlobalRecommender::new(ItemItemGlobalScorer::new(Arc::new(index)));
//! let recs = recommender.global_recommend(&GlobalRecommendRequest::for_item(1).limit(10))?;
//! assert_eq!(recs, vec![5, 7]);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod discount;
pub mod error;
pub mod model;
pub mod observability;
pub mod recommender;
pub mod scorer;
pub mod types;
pub mod vector;

// Re-export key types
pub use aggregate::AggregationPolicy;
pub use crate::config::{load_dotenv, GlobalRecsConfig, RecommenderConfig, ScorerConfig};
pub use discount::{discounted_gain, Discount, ExponentialDiscount};
pub use error::{RecommenderError, Result};
pub use model::{ItemSimilarityIndex, ItemSimilarityIndexBuilder, SimilarityModel};
pub use observability::{init_logging, LogConfig, LogFormat};
pub use recommender::{GlobalItemRecommender, GlobalRecommendRequest, ItemItemGlobalRecommender};
pub use scorer::{GlobalItemScorer, ItemItemGlobalScorer};
pub use types::*;
pub use vector::SparseScoreVector;
