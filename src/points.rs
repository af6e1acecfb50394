//! Position-to-points scoring
//!
//! Positions are 1-based. Anything outside the scale (DNF, zero, negative,
//! beyond the last scoring place) is worth nothing.

use crate::{Error, Result};

/// Points awarded for P1..=P10 in the standard Grand Prix scale.
pub const DEFAULT_SCALE: [i64; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Maps a finishing position to championship points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTable {
    scale: Vec<i64>,
}

impl PointsTable {
    /// Build a table from points per position, index 0 being the winner.
    pub fn from_scale(scale: Vec<i64>) -> Result<Self> {
        if scale.is_empty() {
            return Err(Error::Config("points scale must not be empty".to_string()));
        }
        if scale.iter().any(|p| *p < 0) {
            return Err(Error::Config("points scale must not contain negative values".to_string()));
        }
        Ok(Self { scale })
    }

    /// Points for a finishing position. Unscored positions yield 0.
    pub fn points(&self, position: i64) -> i64 {
        if position < 1 {
            return 0;
        }
        usize::try_from(position - 1)
            .ok()
            .and_then(|idx| self.scale.get(idx))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE.to_vec() }
    }
}
