use ::function_name::named;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};

use super::{Storage, StorageError};
use crate::handicap::HoleCount;
use crate::model::{Course, Player, Round, RoundRecord, TeeRating};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const ROUND_COLUMNS: &str = "round_id, user_id, course_id, tee, played_on, hole_scores, \
     total_score, number_of_holes, course_rating, slope_rating, score_differential, created_at";

fn schema() -> String {
    [
        include_str!("../sql/schema/sqlite/00_player.sql"),
        include_str!("../sql/schema/sqlite/01_course.sql"),
        include_str!("../sql/schema/sqlite/02_tee.sql"),
        include_str!("../sql/schema/sqlite/03_round.sql"),
    ]
    .join("\n")
}

/// `rusqlite`-backed storage. The connection is shared behind a mutex and
/// every query runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and applies the schema.
    /// `:memory:` gives a private in-memory database.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema fails.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StorageError::new(format!("connection lock poisoned: {e}")))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorageError::new(e.to_string()))?
    }
}

/// A `round` row before its text columns are decoded.
struct RoundRow {
    id: i64,
    user_id: String,
    course_id: String,
    tee: String,
    played_on: String,
    hole_scores: String,
    total_score: u32,
    number_of_holes: u8,
    course_rating: f64,
    slope_rating: u32,
    score_differential: f64,
    created_at: String,
}

impl RoundRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            course_id: row.get(2)?,
            tee: row.get(3)?,
            played_on: row.get(4)?,
            hole_scores: row.get(5)?,
            total_score: row.get(6)?,
            number_of_holes: row.get(7)?,
            course_rating: row.get(8)?,
            slope_rating: row.get(9)?,
            score_differential: row.get(10)?,
            created_at: row.get(11)?,
        })
    }

    fn into_round(self) -> Result<Round, StorageError> {
        let id = self.id;
        let fail = |e: String| StorageError::new(format!("round {id} is corrupt: {e}"));
        let date = NaiveDate::parse_from_str(&self.played_on, DATE_FORMAT)
            .map_err(|e| fail(e.to_string()))?;
        let created_at = NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT)
            .map_err(|e| fail(e.to_string()))?;
        let hole_scores: Vec<u32> =
            serde_json::from_str(&self.hole_scores).map_err(|e| fail(e.to_string()))?;
        let number_of_holes =
            HoleCount::try_from(self.number_of_holes).map_err(|e| fail(e.to_string()))?;
        Ok(Round {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            tee: self.tee,
            date,
            hole_scores,
            total_score: self.total_score,
            number_of_holes,
            course_rating: self.course_rating,
            slope_rating: self.slope_rating,
            score_differential: self.score_differential,
            created_at,
        })
    }
}

#[named]
fn select_rounds(
    conn: &Connection,
    user_id: &str,
    order: &str,
    limit: Option<usize>,
) -> Result<Vec<Round>, StorageError> {
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let sql = format!(
        "SELECT {ROUND_COLUMNS} FROM round WHERE user_id = ?1 \
         ORDER BY played_on {order}, created_at {order}, round_id {order} LIMIT ?2"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StorageError::new(format!("{}: {e}", function_name!())))?;
    let rows = stmt
        .query_map(params![user_id, limit], RoundRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(RoundRow::into_round).collect()
}

fn select_round(conn: &Connection, round_id: i64) -> Result<Option<Round>, StorageError> {
    let sql = format!("SELECT {ROUND_COLUMNS} FROM round WHERE round_id = ?1");
    let row = conn
        .query_row(&sql, params![round_id], RoundRow::from_row)
        .optional()?;
    row.map(RoundRow::into_round).transpose()
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get_player(&self, user_id: &str) -> Result<Option<Player>, StorageError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| {
            Ok(conn
                .query_row(
                    "SELECT user_id, name, handicap_index FROM player WHERE user_id = ?1",
                    params![user_id],
                    |row| {
                        Ok(Player {
                            user_id: row.get(0)?,
                            name: row.get(1)?,
                            handicap_index: row.get(2)?,
                        })
                    },
                )
                .optional()?)
        })
        .await
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        let player = player.clone();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO player (user_id, name, handicap_index) VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id) DO UPDATE SET name = excluded.name,
                 handicap_index = excluded.handicap_index",
                params![player.user_id, player.name, player.handicap_index],
            )?;
            Ok(())
        })
        .await
    }

    async fn set_handicap_index(
        &self,
        user_id: &str,
        handicap_index: f64,
    ) -> Result<(), StorageError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| {
            let updated = conn.execute(
                "UPDATE player SET handicap_index = ?2 WHERE user_id = ?1",
                params![user_id, handicap_index],
            )?;
            if updated == 0 {
                return Err(StorageError::new(format!("no player {user_id}")));
            }
            Ok(())
        })
        .await
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>, StorageError> {
        let course_id = course_id.to_string();
        self.with_connection(move |conn| {
            let name: Option<String> = conn
                .query_row(
                    "SELECT name FROM course WHERE course_id = ?1",
                    params![course_id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(name) = name else {
                return Ok(None);
            };
            let mut stmt = conn.prepare(
                "SELECT color, rating, slope FROM tee WHERE course_id = ?1 ORDER BY color",
            )?;
            let tees = stmt
                .query_map(params![course_id], |row| {
                    Ok(TeeRating {
                        color: row.get(0)?,
                        rating: row.get(1)?,
                        slope: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(Some(Course {
                course_id,
                name,
                tees,
            }))
        })
        .await
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        let course = course.clone();
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO course (course_id, name) VALUES (?1, ?2)
                 ON CONFLICT (course_id) DO UPDATE SET name = excluded.name",
                params![course.course_id, course.name],
            )?;
            tx.execute(
                "DELETE FROM tee WHERE course_id = ?1",
                params![course.course_id],
            )?;
            for tee in &course.tees {
                tx.execute(
                    "INSERT INTO tee (course_id, color, rating, slope) VALUES (?1, ?2, ?3, ?4)",
                    params![course.course_id, tee.color, tee.rating, tee.slope],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn insert_round(&self, round: RoundRecord) -> Result<Round, StorageError> {
        self.with_connection(move |conn| {
            // stored at microsecond precision; keep the returned value identical
            let created_at = Utc::now().naive_utc().trunc_subsecs(6);
            let hole_scores = serde_json::to_string(&round.hole_scores)
                .map_err(|e| StorageError::new(e.to_string()))?;
            conn.execute(
                "INSERT INTO round (user_id, course_id, tee, played_on, hole_scores, total_score,
                 number_of_holes, course_rating, slope_rating, score_differential, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    round.user_id,
                    round.course_id,
                    round.tee,
                    round.date.format(DATE_FORMAT).to_string(),
                    hole_scores,
                    round.total_score,
                    round.number_of_holes.holes(),
                    round.course_rating,
                    round.slope_rating,
                    round.score_differential,
                    created_at.format(TIMESTAMP_FORMAT).to_string(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Round::from_record(id, created_at, round))
        })
        .await
    }

    async fn get_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        self.with_connection(move |conn| select_round(conn, round_id))
            .await
    }

    async fn delete_round(&self, round_id: i64) -> Result<Option<Round>, StorageError> {
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            let existing = select_round(&tx, round_id)?;
            if existing.is_some() {
                tx.execute("DELETE FROM round WHERE round_id = ?1", params![round_id])?;
            }
            tx.commit()?;
            Ok(existing)
        })
        .await
    }

    async fn recent_rounds(&self, user_id: &str, limit: usize) -> Result<Vec<Round>, StorageError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| select_rounds(conn, &user_id, "DESC", Some(limit)))
            .await
    }

    async fn rounds_oldest_first(&self, user_id: &str) -> Result<Vec<Round>, StorageError> {
        let user_id = user_id.to_string();
        self.with_connection(move |conn| select_rounds(conn, &user_id, "ASC", None))
            .await
    }
}
