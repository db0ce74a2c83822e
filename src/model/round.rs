use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::handicap::HoleCount;

/// Most strokes a single hole may record.
pub const MAX_HOLE_STROKES: u32 = 30;

/// A scorecard as submitted, before the differential is known.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewRound {
    pub user_id: String,
    pub course_id: String,
    pub tee: String,
    pub date: NaiveDate,
    pub hole_scores: Vec<u32>,
}

impl NewRound {
    /// Sum of the hole scores, `None` if it does not fit in a `u32`.
    #[must_use]
    pub fn total_score(&self) -> Option<u32> {
        self.hole_scores
            .iter()
            .try_fold(0u32, |total, &strokes| total.checked_add(strokes))
    }
}

/// A round ready to be stored: the scorecard plus the ratings it was played
/// against and its differential. Storage assigns `id` and `created_at`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundRecord {
    pub user_id: String,
    pub course_id: String,
    pub tee: String,
    pub date: NaiveDate,
    pub hole_scores: Vec<u32>,
    pub total_score: u32,
    pub number_of_holes: HoleCount,
    pub course_rating: f64,
    pub slope_rating: u32,
    pub score_differential: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Round {
    pub id: i64,
    pub user_id: String,
    pub course_id: String,
    pub tee: String,
    pub date: NaiveDate,
    pub hole_scores: Vec<u32>,
    pub total_score: u32,
    pub number_of_holes: HoleCount,
    pub course_rating: f64,
    pub slope_rating: u32,
    pub score_differential: f64,
    pub created_at: NaiveDateTime,
}

impl Round {
    #[must_use]
    pub fn from_record(id: i64, created_at: NaiveDateTime, record: RoundRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            course_id: record.course_id,
            tee: record.tee,
            date: record.date,
            hole_scores: record.hole_scores,
            total_score: record.total_score,
            number_of_holes: record.number_of_holes,
            course_rating: record.course_rating,
            slope_rating: record.slope_rating,
            score_differential: record.score_differential,
            created_at,
        }
    }
}

/// Most recent first: later date, then later insertion, then higher id.
#[must_use]
pub fn recency_order(a: &Round, b: &Round) -> std::cmp::Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}
