#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rusty_handicap::model::{Course, NewRound, Player, Round, RoundRecord, TeeRating};
use rusty_handicap::storage::{MemoryStorage, Storage, StorageError};

pub const COURSE_ID: &str = "pine";

/// Par-72 course whose white tees are rated 72.0 / 113, so an 18-hole
/// differential equals `total - 72`.
pub fn standard_course() -> Course {
    Course {
        course_id: COURSE_ID.to_string(),
        name: "Pine Hollow".to_string(),
        tees: vec![
            TeeRating {
                color: "white".to_string(),
                rating: 72.0,
                slope: 113,
            },
            TeeRating {
                color: "blue".to_string(),
                rating: 74.1,
                slope: 131,
            },
        ],
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid test date")
}

/// Per-hole strokes adding up to `total` over `holes` holes.
pub fn card(total: u32, holes: u32) -> Vec<u32> {
    let base = total / holes;
    let extra = total % holes;
    (0..holes).map(|i| base + u32::from(i < extra)).collect()
}

pub fn new_round(user_id: &str, on: NaiveDate, total: u32) -> NewRound {
    NewRound {
        user_id: user_id.to_string(),
        course_id: COURSE_ID.to_string(),
        tee: "white".to_string(),
        date: on,
        hole_scores: card(total, 18),
    }
}

pub async fn seeded_storage<S: Storage>(storage: S, players: &[&str]) -> S {
    storage
        .upsert_course(&standard_course())
        .await
        .expect("course stored");
    for user_id in players {
        storage
            .upsert_player(&Player::new(*user_id, user_id.to_uppercase()))
            .await
            .expect("player stored");
    }
    storage
}

pub async fn memory_storage(players: &[&str]) -> MemoryStorage {
    seeded_storage(MemoryStorage::new(), players).await
}

/// Memory storage whose handicap writes fail while `fail_handicap_writes`
/// is set, and whose `failing_insert`-th round insert fails (0 for never).
#[derive(Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    pub fail_handicap_writes: AtomicBool,
    pub failing_insert: AtomicUsize,
    pub inserts: AtomicUsize,
}

impl FlakyStorage {
    pub fn set_failing(&self, failing: bool) {
        self.fail_handicap_writes.store(failing, Ordering::SeqCst);
    }

    pub fn fail_insert_number(&self, n: usize) {
        self.failing_insert.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn get_player(&self, user_id: &str) -> Result<Option<Player>, StorageError> {
        self.inner.get_player(user_id).await
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        self.inner.upsert_player(player).await
    }

    async fn set_handicap_index(
        &self,
        user_id: &str,
        handicap_index: f64,
    ) -> Result<(), StorageError> {
        if self.fail_handicap_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new("handicap store unavailable"));
        }
        self.inner.set_handicap_index(user_id, handicap_index).await
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>, StorageError> {
        self.inner.get_course(course_id).await
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        self.inner.upsert_course(course).await
    }

    async fn insert_round(&self, round: RoundRecord) -> Result<Round, StorageError> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.failing_insert.load(Ordering::SeqCst) {
            return Err(StorageError::new(format!("insert {n} rejected")));
        }
        self.inner.insert_round(round).await
    }

    async fn get_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        self.inner.get_round(round_id).await
    }

    async fn delete_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        self.inner.delete_round(round_id).await
    }

    async fn recent_rounds(&self, user_id: &str, limit: usize) -> Result<Vec<Round>, StorageError> {
        self.inner.recent_rounds(user_id, limit).await
    }

    async fn rounds_oldest_first(&self, user_id: &str) -> Result<Vec<Round>, StorageError> {
        self.inner.rounds_oldest_first(user_id).await
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
