use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::handicap::MAX_HANDICAP;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    pub user_id: String,
    pub name: String,
    #[serde(default = "default_handicap_index")]
    pub handicap_index: f64,
}

impl Player {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            handicap_index: MAX_HANDICAP,
        }
    }
}

fn default_handicap_index() -> f64 {
    MAX_HANDICAP
}

/// Handicap as it stood right after one historical round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HandicapPoint {
    pub round_id: i64,
    pub date: NaiveDate,
    pub score_differential: f64,
    pub handicap_index: f64,
    pub rounds_considered: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HandicapHistory {
    pub user_id: String,
    pub points: Vec<HandicapPoint>,
}
