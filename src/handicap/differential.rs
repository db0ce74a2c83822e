use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum HoleCount {
    Nine,
    #[default]
    Eighteen,
}

impl HoleCount {
    #[must_use]
    pub fn holes(self) -> u8 {
        match self {
            Self::Nine => 9,
            Self::Eighteen => 18,
        }
    }

    /// Hole count for a scorecard with `len` entries.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` unless the card has 9 or 18 holes.
    pub fn from_hole_scores(len: usize) -> Result<Self, CoreError> {
        match len {
            9 => Ok(Self::Nine),
            18 => Ok(Self::Eighteen),
            other => Err(CoreError::Validation(format!(
                "a round must have 9 or 18 hole scores, got {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for HoleCount {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_hole_scores(usize::from(value))
    }
}

impl From<HoleCount> for u8 {
    fn from(value: HoleCount) -> Self {
        value.holes()
    }
}

/// Score differential for one round, unrounded.
///
/// `course_rating` is the rating for the holes actually played (half the
/// 18-hole rating on a nine-hole card). `slope_rating` is always the full
/// 18-hole slope. Nine-hole score and rating are doubled before applying
/// the slope so the slope contributes as it would over 18 holes.
///
/// The caller guarantees `slope_rating > 0`.
#[must_use]
pub fn compute_differential(
    total_score: u32,
    course_rating: f64,
    slope_rating: u32,
    holes: HoleCount,
) -> f64 {
    let (adjusted_score, adjusted_rating) = match holes {
        HoleCount::Nine => (f64::from(total_score) * 2.0, course_rating * 2.0),
        HoleCount::Eighteen => (f64::from(total_score), course_rating),
    };
    ((adjusted_score - adjusted_rating) * STANDARD_SLOPE) / f64::from(slope_rating)
}
