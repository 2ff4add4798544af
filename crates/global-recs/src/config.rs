//! Configuration for the global recommender
//!
//! Values are layered: built-in defaults, then an optional `config/global-recs`
//! file (any format the `config` crate understands), then environment variables
//! prefixed with `GLOBAL_RECS` using `__` as the nesting separator.
//!
//! # Example
//!
//! ```bash
//! export GLOBAL_RECS__SCORER__MIN_NEIGHBORS="2"
//! export GLOBAL_RECS__SCORER__AGGREGATION="max_similarity"
//! export GLOBAL_RECS__RECOMMENDER__DEFAULT_LIMIT="20"
//! export GLOBAL_RECS__LOGGING__LEVEL="debug"
//! ```

use crate::aggregate::AggregationPolicy;
use crate::error::{RecommenderError, Result};
use crate::observability::LogConfig;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "GLOBAL_RECS";
const CONFIG_FILE: &str = "config/global-recs";

/// Scorer configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Aggregation of contributing neighbor weights (default: similarity_sum)
    pub aggregation: AggregationPolicy,
    /// Minimum contributing neighbors for an item to be scored (default: 1)
    pub min_neighbors: usize,
    /// Maximum contributing neighbors aggregated per item (default: unbounded)
    pub max_neighbors: Option<usize>,
    /// Reject empty baskets instead of scoring everything as unscored (default: false)
    pub require_nonempty_basket: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationPolicy::SimilaritySum,
            min_neighbors: 1,
            max_neighbors: None,
            require_nonempty_basket: false,
        }
    }
}

impl ScorerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_neighbors == 0 {
            return Err(RecommenderError::configuration(
                "min_neighbors must be at least 1",
                "scorer.min_neighbors",
            ));
        }

        if let Some(max) = self.max_neighbors {
            if max < self.min_neighbors {
                return Err(RecommenderError::configuration(
                    format!(
                        "max_neighbors ({}) cannot be less than min_neighbors ({})",
                        max, self.min_neighbors
                    ),
                    "scorer.max_neighbors",
                ));
            }
        }

        Ok(())
    }
}

/// Recommender configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Result size used when a request sets no limit; negative means unbounded (default: -1)
    pub default_limit: i64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { default_limit: -1 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalRecsConfig {
    pub scorer: ScorerConfig,
    pub recommender: RecommenderConfig,
    pub logging: LogConfig,
}

impl GlobalRecsConfig {
    /// Load configuration from the optional config file and environment
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scorer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Load a `.env` file if present
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }
}
