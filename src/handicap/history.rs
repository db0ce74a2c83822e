use crate::handicap::aggregate::HandicapMethod;
use crate::model::{HandicapPoint, Round};

/// Replays the history approximation over every chronological prefix of
/// `rounds`, which must be ordered oldest first. One point per round.
#[must_use]
pub fn handicap_history(rounds: &[Round]) -> Vec<HandicapPoint> {
    let method = HandicapMethod::HistoryApproximation;
    let mut differentials = Vec::with_capacity(rounds.len());
    let mut points = Vec::with_capacity(rounds.len());

    for round in rounds {
        differentials.push(round.score_differential);
        points.push(HandicapPoint {
            round_id: round.id,
            date: round.date,
            score_differential: round.score_differential,
            handicap_index: method.compute(&differentials),
            rounds_considered: differentials.len(),
        });
    }

    points
}
