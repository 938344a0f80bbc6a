use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

/// Fixed identifier the single best-score scalar is stored under.
const BEST_SCORE_KEY: &str = "2048-best-score";

/// Minimal persistence for the best score: one SQLite key/value table.
///
/// Schema:
/// - scores(score_key TEXT PRIMARY KEY, score_value INTEGER)
///
/// Read once at startup, written whenever the in-session score surpasses the
/// stored value. A missing row reads as 0, not an error.
pub struct BestScoreStore {
    conn: Connection,
}

impl BestScoreStore {
    /// Create or open the store at `path`, ensure schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", &"WAL")?;
        conn.pragma_update(None, "synchronous", &"NORMAL")?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                score_key TEXT PRIMARY KEY,
                score_value INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    /// Read the persisted best score.
    pub fn best_score(&self) -> Result<u64, rusqlite::Error> {
        let value = self
            .conn
            .query_row(
                "SELECT score_value FROM scores WHERE score_key = ?1",
                params![BEST_SCORE_KEY],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(value.unwrap_or(0) as u64)
    }

    /// Insert or update the persisted best score.
    pub fn record_best_score(&mut self, score: u64) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO scores (score_key, score_value) VALUES (?1, ?2)
             ON CONFLICT(score_key) DO UPDATE SET score_value=excluded.score_value",
            params![BEST_SCORE_KEY, score as i64],
        )?;
        Ok(())
    }
}
