use serde::{Deserialize, Serialize};

/// Ratings for one set of tees. `rating` is the published 18-hole course
/// rating; `slope` applies to 9 and 18 holes alike.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeeRating {
    pub color: String,
    pub rating: f64,
    pub slope: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    pub course_id: String,
    pub name: String,
    pub tees: Vec<TeeRating>,
}

impl Course {
    /// Tee lookup by colour, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn tee(&self, color: &str) -> Option<&TeeRating> {
        let wanted = color.trim();
        self.tees
            .iter()
            .find(|tee| tee.color.trim().eq_ignore_ascii_case(wanted))
    }
}
