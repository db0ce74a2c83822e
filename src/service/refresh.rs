use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::handicap::{MAX_RECENT_ROUNDS, compute_handicap};
use crate::storage::Storage;

/// Outcome of recomputing and overwriting one player's stored handicap.
///
/// A refresh never fails the round mutation that triggered it; callers log
/// `Failed` and carry on with a stale index.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandicapRefresh {
    Updated {
        user_id: String,
        handicap_index: f64,
        rounds_considered: usize,
    },
    Failed {
        user_id: String,
        error: String,
    },
}

impl HandicapRefresh {
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Updated { user_id, .. } | Self::Failed { user_id, .. } => user_id,
        }
    }

    #[must_use]
    pub fn handicap_index(&self) -> Option<f64> {
        match self {
            Self::Updated { handicap_index, .. } => Some(*handicap_index),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    pub fn log(&self) {
        match self {
            Self::Updated {
                user_id,
                handicap_index,
                rounds_considered,
            } => log::info!(
                "handicap updated for {user_id}: {handicap_index:.1} from {rounds_considered} rounds"
            ),
            Self::Failed { user_id, error } => {
                log::warn!("handicap update failed for {user_id}, keeping stored value: {error}");
            }
        }
    }
}

async fn recompute_and_store(
    storage: &dyn Storage,
    user_id: &str,
) -> Result<(f64, usize), CoreError> {
    let rounds = storage.recent_rounds(user_id, MAX_RECENT_ROUNDS).await?;
    let differentials: Vec<f64> = rounds.iter().map(|r| r.score_differential).collect();
    let handicap_index = compute_handicap(&differentials);
    storage.set_handicap_index(user_id, handicap_index).await?;
    Ok((handicap_index, differentials.len()))
}

/// Recomputes `user_id`'s handicap from their latest 20 rounds and overwrites
/// the stored value. Errors are captured in the returned status.
pub async fn refresh_handicap(storage: &dyn Storage, user_id: &str) -> HandicapRefresh {
    match recompute_and_store(storage, user_id).await {
        Ok((handicap_index, rounds_considered)) => HandicapRefresh::Updated {
            user_id: user_id.to_string(),
            handicap_index,
            rounds_considered,
        },
        Err(e) => HandicapRefresh::Failed {
            user_id: user_id.to_string(),
            error: e.to_string(),
        },
    }
}

/// One refresh per distinct player, run concurrently. Results come back in
/// user id order.
pub async fn refresh_handicaps<I, S>(storage: &dyn Storage, user_ids: I) -> Vec<HandicapRefresh>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let distinct: BTreeSet<String> = user_ids.into_iter().map(Into::into).collect();
    join_all(
        distinct
            .iter()
            .map(|user_id| refresh_handicap(storage, user_id)),
    )
    .await
}
