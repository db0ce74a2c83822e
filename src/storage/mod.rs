pub mod memory;
pub mod sqlite;

pub use crate::error::StorageError;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::model::{Course, Player, Round, RoundRecord};
use async_trait::async_trait;

/// Persistence for players, courses and rounds.
///
/// Round queries order by date, then insertion time, then id, so rounds
/// played on the same day keep a stable order.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_player(&self, user_id: &str) -> Result<Option<Player>, StorageError>;
    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError>;
    /// Overwrites the stored index. Last writer wins.
    async fn set_handicap_index(&self, user_id: &str, handicap_index: f64)
    -> Result<(), StorageError>;
    async fn get_course(&self, course_id: &str) -> Result<Option<Course>, StorageError>;
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError>;
    async fn insert_round(&self, round: RoundRecord) -> Result<Round, StorageError>;
    async fn get_round(&self, round_id: i64) -> Result<Option<Round>, StorageError>;
    /// Removes a round, returning it if it existed.
    async fn delete_round(&self, round_id: i64) -> Result<Option<Round>, StorageError>;
    /// At most `limit` rounds for the player, most recent first.
    async fn recent_rounds(&self, user_id: &str, limit: usize) -> Result<Vec<Round>, StorageError>;
    /// Every round for the player, oldest first.
    async fn rounds_oldest_first(&self, user_id: &str) -> Result<Vec<Round>, StorageError>;
}
