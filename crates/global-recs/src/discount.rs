//! Rank discounting for ranked recommendation lists
//!
//! Downstream metrics weight a hit by its position. Ranks are 1-based.

use crate::error::{RecommenderError, Result};
use crate::types::{ItemId, ItemSet};
use std::fmt;

/// Position discount function
pub trait Discount {
    /// Weight of a hit at 1-based `rank`
    fn discount(&self, rank: usize) -> f64;
}

/// Exponential (half-life) discount: `2^(-(rank - 1) / (half_life - 1))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDiscount {
    half_life: f64,
}

impl ExponentialDiscount {
    /// # Errors
    ///
    /// Returns `InvalidHalfLife` unless `half_life > 1`.
    pub fn new(half_life: f64) -> Result<Self> {
        if !half_life.is_finite() || half_life <= 1.0 {
            return Err(RecommenderError::InvalidHalfLife(half_life));
        }
        Ok(Self { half_life })
    }

    pub fn half_life(&self) -> f64 {
        self.half_life
    }
}

impl Discount for ExponentialDiscount {
    fn discount(&self, rank: usize) -> f64 {
        let exponent = (rank as f64 - 1.0) / (self.half_life - 1.0);
        1.0 / 2f64.powf(exponent)
    }
}

impl fmt::Display for ExponentialDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExponentialDiscount({})", self.half_life)
    }
}

/// Sum of discounts at the positions of `relevant` items in `ranked`
pub fn discounted_gain<D: Discount + ?Sized>(
    ranked: &[ItemId],
    relevant: &ItemSet,
    discount: &D,
) -> f64 {
    ranked
        .iter()
        .enumerate()
        .filter(|(_, item)| relevant.contains(*item))
        .map(|(pos, _)| discount.discount(pos + 1))
        .sum()
}
