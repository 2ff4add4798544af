//! Error types for global scoring and recommendation.

use crate::types::ItemId;

pub type Result<T> = std::result::Result<T, RecommenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RecommenderError {
    /// A score vector was queried for an item outside its requested universe.
    #[error("Item {item} is not in the score vector's domain")]
    KeyNotInDomain { item: ItemId },

    #[error("Invalid basket: {0}")]
    InvalidBasket(String),

    #[error("Invalid similarity weight {weight} for item {item} -> neighbor {neighbor}")]
    InvalidWeight {
        item: ItemId,
        neighbor: ItemId,
        weight: f64,
    },

    #[error("Half-life must be greater than 1, got {0}")]
    InvalidHalfLife(f64),

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        key: Option<String>,
    },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl RecommenderError {
    /// Create a configuration error tied to a specific key
    pub fn configuration(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

impl From<config::ConfigError> for RecommenderError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
            key: None,
        }
    }
}
