use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{Course, NewRound, Player};
use crate::service::{BatchMutation, create_rounds_batch};
use crate::storage::Storage;

#[derive(Deserialize, Debug, Default)]
pub struct SeedData {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<NewRound>,
}

/// format we have is this:
/// { "courses": [{"course_id": "...", "name": "...", "tees": [{"color": "white", "rating": <float>, "slope": <int>}]}]
/// , "players": [{"user_id": "...", "name": "..."}]
/// , "rounds": [{"user_id": "...", "course_id": "...", "tee": "white", "date": "YYYY-MM-DD", "hole_scores": [<int>, ...]}]
/// }
///
/// Courses and players are upserted; rounds are recorded like any other
/// batch, so differentials and handicaps come out of the normal path.
///
/// # Errors
/// Returns an error if the document does not deserialize or any write fails.
pub async fn db_prefill(seed: &Value, storage: &dyn Storage) -> Result<BatchMutation, CoreError> {
    let seed = SeedData::deserialize(seed)?;

    for course in &seed.courses {
        storage.upsert_course(course).await?;
    }
    for player in &seed.players {
        storage.upsert_player(player).await?;
    }

    let result = create_rounds_batch(storage, seed.rounds).await?;
    log::info!(
        "seeded {} courses, {} players, {} rounds",
        seed.courses.len(),
        seed.players.len(),
        result.rounds.len()
    );
    Ok(result)
}
