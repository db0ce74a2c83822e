use ahash::RandomState;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{Storage, StorageError};
use crate::model::{Course, Player, Round, RoundRecord, recency_order};

#[derive(Default)]
struct Tables {
    players: HashMap<String, Player, RandomState>,
    courses: HashMap<String, Course, RandomState>,
    rounds: BTreeMap<i64, Round>,
    last_round_id: i64,
}

/// Process-local storage, used for tests and `--db-type memory`.
#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn rounds_for(&self, user_id: &str) -> Vec<Round> {
        let tables = self.tables.read().await;
        let mut rounds: Vec<Round> = tables
            .rounds
            .values()
            .filter(|round| round.user_id == user_id)
            .cloned()
            .collect();
        rounds.sort_by(recency_order);
        rounds
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_player(&self, user_id: &str) -> Result<Option<Player>, StorageError> {
        Ok(self.tables.read().await.players.get(user_id).cloned())
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .players
            .insert(player.user_id.clone(), player.clone());
        Ok(())
    }

    async fn set_handicap_index(
        &self,
        user_id: &str,
        handicap_index: f64,
    ) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let player = tables
            .players
            .get_mut(user_id)
            .ok_or_else(|| StorageError::new(format!("no player {user_id}")))?;
        player.handicap_index = handicap_index;
        Ok(())
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>, StorageError> {
        Ok(self.tables.read().await.courses.get(course_id).cloned())
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .courses
            .insert(course.course_id.clone(), course.clone());
        Ok(())
    }

    async fn insert_round(&self, round: RoundRecord) -> Result<Round, StorageError> {
        let mut tables = self.tables.write().await;
        tables.last_round_id += 1;
        let id = tables.last_round_id;
        let stored = Round::from_record(id, Utc::now().naive_utc(), round);
        tables.rounds.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        Ok(self.tables.read().await.rounds.get(&round_id).cloned())
    }

    async fn delete_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        Ok(self.tables.write().await.rounds.remove(&round_id))
    }

    async fn recent_rounds(&self, user_id: &str, limit: usize) -> Result<Vec<Round>, StorageError> {
        let mut rounds = self.rounds_for(user_id).await;
        rounds.truncate(limit);
        Ok(rounds)
    }

    async fn rounds_oldest_first(&self, user_id: &str) -> Result<Vec<Round>, StorageError> {
        let mut rounds = self.rounds_for(user_id).await;
        rounds.reverse();
        Ok(rounds)
    }
}
