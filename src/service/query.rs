use crate::error::CoreError;
use crate::handicap::handicap_history;
use crate::model::{HandicapHistory, Player};
use crate::storage::Storage;

/// The player record with its last published handicap.
///
/// # Errors
/// `NotFound` for an unknown player, or a storage error.
pub async fn current_handicap(storage: &dyn Storage, user_id: &str) -> Result<Player, CoreError> {
    storage
        .get_player(user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("player {user_id}")))
}

/// Handicap after each of the player's rounds, oldest first.
///
/// # Errors
/// `NotFound` for an unknown player, or a storage error.
pub async fn load_handicap_history(
    storage: &dyn Storage,
    user_id: &str,
) -> Result<HandicapHistory, CoreError> {
    let player = current_handicap(storage, user_id).await?;
    player_history(storage, &player).await
}

/// History for a player record the caller already holds.
///
/// # Errors
/// Returns a storage error.
pub async fn player_history(
    storage: &dyn Storage,
    player: &Player,
) -> Result<HandicapHistory, CoreError> {
    let rounds = storage.rounds_oldest_first(&player.user_id).await?;
    Ok(HandicapHistory {
        user_id: player.user_id.clone(),
        points: handicap_history(&rounds),
    })
}
