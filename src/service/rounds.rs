use serde::Serialize;

use super::refresh::{HandicapRefresh, refresh_handicap, refresh_handicaps};
use crate::error::CoreError;
use crate::handicap::{HoleCount, compute_differential};
use crate::model::{MAX_HOLE_STROKES, NewRound, Round, RoundRecord};
use crate::storage::Storage;

#[derive(Serialize, Clone, Debug)]
pub struct RoundMutation {
    pub round: Round,
    pub handicap: HandicapRefresh,
}

#[derive(Serialize, Clone, Debug, Default)]
pub struct BatchMutation {
    pub rounds: Vec<Round>,
    pub missing_round_ids: Vec<i64>,
    pub handicaps: Vec<HandicapRefresh>,
}

/// Validates a scorecard against the player and course records and computes
/// its differential.
///
/// # Errors
/// `NotFound` for an unknown player, course or tee; `Validation` for a card
/// that is not 9 or 18 holes, a hole score of zero or above
/// `MAX_HOLE_STROKES`, or unusable tee ratings.
pub async fn prepare_round(
    storage: &dyn Storage,
    new_round: &NewRound,
) -> Result<RoundRecord, CoreError> {
    if storage.get_player(&new_round.user_id).await?.is_none() {
        return Err(CoreError::NotFound(format!("player {}", new_round.user_id)));
    }

    let holes = HoleCount::from_hole_scores(new_round.hole_scores.len())?;
    if let Some(hole) = new_round.hole_scores.iter().position(|&s| s == 0) {
        return Err(CoreError::Validation(format!(
            "hole {} has no strokes recorded",
            hole + 1
        )));
    }
    if let Some(hole) = new_round
        .hole_scores
        .iter()
        .position(|&s| s > MAX_HOLE_STROKES)
    {
        return Err(CoreError::Validation(format!(
            "hole {} has more than {MAX_HOLE_STROKES} strokes",
            hole + 1
        )));
    }
    let total_score = new_round
        .total_score()
        .ok_or_else(|| CoreError::Validation("total score is out of range".to_string()))?;

    let course = storage
        .get_course(&new_round.course_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("course {}", new_round.course_id)))?;
    let tee = course.tee(&new_round.tee).ok_or_else(|| {
        CoreError::NotFound(format!(
            "tee {} on course {}",
            new_round.tee, new_round.course_id
        ))
    })?;
    if tee.slope == 0 || tee.rating <= 0.0 {
        return Err(CoreError::Validation(format!(
            "tee {} on course {} has no usable rating",
            tee.color, course.course_id
        )));
    }

    // Tees carry the 18-hole rating; a nine-hole card is rated at half.
    let course_rating = match holes {
        HoleCount::Nine => tee.rating / 2.0,
        HoleCount::Eighteen => tee.rating,
    };

    Ok(RoundRecord {
        user_id: new_round.user_id.clone(),
        course_id: course.course_id.clone(),
        tee: tee.color.clone(),
        date: new_round.date,
        hole_scores: new_round.hole_scores.clone(),
        total_score,
        number_of_holes: holes,
        course_rating,
        slope_rating: tee.slope,
        score_differential: compute_differential(total_score, course_rating, tee.slope, holes),
    })
}

/// Stores one round, then refreshes the player's handicap.
///
/// # Errors
/// Returns an error if validation or the insert fails. A failed handicap
/// refresh is reported in the result, not as an error.
pub async fn create_round(
    storage: &dyn Storage,
    new_round: NewRound,
) -> Result<RoundMutation, CoreError> {
    let record = prepare_round(storage, &new_round).await?;
    let round = storage.insert_round(record).await?;
    let handicap = refresh_handicap(storage, &round.user_id).await;
    handicap.log();
    Ok(RoundMutation { round, handicap })
}

/// Stores rounds for any number of players. Every card is validated before
/// the first insert; afterwards each affected player is refreshed once.
///
/// # Errors
/// Returns the first validation or insert error. Rounds inserted before a
/// failed insert are kept and their players are still refreshed.
pub async fn create_rounds_batch(
    storage: &dyn Storage,
    new_rounds: Vec<NewRound>,
) -> Result<BatchMutation, CoreError> {
    let mut records = Vec::with_capacity(new_rounds.len());
    for new_round in &new_rounds {
        records.push(prepare_round(storage, new_round).await?);
    }

    let mut rounds = Vec::with_capacity(records.len());
    let mut insert_error = None;
    for record in records {
        match storage.insert_round(record).await {
            Ok(round) => rounds.push(round),
            Err(e) => {
                insert_error = Some(e);
                break;
            }
        }
    }

    // Rounds stored before a failed insert stay, so their players still refresh.
    let handicaps = refresh_handicaps(storage, rounds.iter().map(|r| r.user_id.clone())).await;
    handicaps.iter().for_each(HandicapRefresh::log);
    if let Some(e) = insert_error {
        log::warn!(
            "batch insert stopped after {} of {} rounds: {e}",
            rounds.len(),
            new_rounds.len()
        );
        return Err(e.into());
    }

    Ok(BatchMutation {
        rounds,
        missing_round_ids: Vec::new(),
        handicaps,
    })
}

/// Deletes one round, then refreshes its owner's handicap.
///
/// # Errors
/// `NotFound` if the round does not exist, or a storage error.
pub async fn delete_round(
    storage: &dyn Storage,
    round_id: i64,
) -> Result<RoundMutation, CoreError> {
    let round = storage
        .delete_round(round_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("round {round_id}")))?;
    let handicap = refresh_handicap(storage, &round.user_id).await;
    handicap.log();
    Ok(RoundMutation { round, handicap })
}

/// Deletes every listed round that exists. Unknown ids are reported back
/// rather than failing the batch.
///
/// # Errors
/// Returns the first storage error raised by a delete.
pub async fn delete_rounds_batch(
    storage: &dyn Storage,
    round_ids: &[i64],
) -> Result<BatchMutation, CoreError> {
    let mut result = BatchMutation::default();
    for &round_id in round_ids {
        match storage.delete_round(round_id).await? {
            Some(round) => result.rounds.push(round),
            None => result.missing_round_ids.push(round_id),
        }
    }

    result.handicaps =
        refresh_handicaps(storage, result.rounds.iter().map(|r| r.user_id.clone())).await;
    result.handicaps.iter().for_each(HandicapRefresh::log);
    Ok(result)
}
