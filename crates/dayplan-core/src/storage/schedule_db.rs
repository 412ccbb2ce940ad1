//! SQLite-backed schedule store.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::data_dir;
use super::migrations;
use super::schedule_store::ScheduleStore;
use crate::error::{Result, StorageError};
use crate::schedule::DaySchedule;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(value: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| StorageError::Corrupt {
        date: value.to_string(),
        message: e.to_string(),
    })
}

/// SQLite database for generated schedules.
///
/// Each date holds one row with the full schedule as JSON. A side table maps
/// block ids to dates so completion updates can find their schedule.
pub struct SqliteScheduleStore {
    conn: Connection,
}

impl SqliteScheduleStore {
    /// Open the database at `~/.config/dayplan/dayplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("dayplan.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn).map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Remove the schedule for `date`. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete(&mut self, date: NaiveDate) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let key = format_date(date);
        tx.execute("DELETE FROM schedule_blocks WHERE date = ?1", params![key])?;
        let deleted = tx.execute("DELETE FROM schedules WHERE date = ?1", params![key])?;
        tx.commit()?;
        Ok(deleted > 0)
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn load(&self, date: NaiveDate) -> Result<Option<DaySchedule>> {
        let key = format_date(date);
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM schedules WHERE date = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };
        let schedule = serde_json::from_str(&payload).map_err(|e| StorageError::Corrupt {
            date: key,
            message: e.to_string(),
        })?;
        Ok(Some(schedule))
    }

    fn save(&mut self, schedule: &DaySchedule) -> Result<()> {
        let key = format_date(schedule.date);
        let payload = serde_json::to_string(schedule)?;
        let version = i64::try_from(schedule.version).unwrap_or(i64::MAX);

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO schedules (date, version, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                version = excluded.version,
                payload = excluded.payload,
                updated_at = excluded.updated_at",
            params![key, version, payload, Utc::now().to_rfc3339()],
        )?;
        tx.execute("DELETE FROM schedule_blocks WHERE date = ?1", params![key])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO schedule_blocks (block_id, date) VALUES (?1, ?2)",
            )?;
            for block in &schedule.time_blocks {
                stmt.execute(params![block.id, key])?;
            }
        }
        tx.commit()?;

        debug!(date = %key, version = schedule.version, blocks = schedule.time_blocks.len(), "saved schedule");
        Ok(())
    }

    fn find_block_date(&self, block_id: &str) -> Result<Option<NaiveDate>> {
        let date: Option<String> = self
            .conn
            .query_row(
                "SELECT date FROM schedule_blocks WHERE block_id = ?1",
                params![block_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(date.as_deref().map(parse_date).transpose()?)
    }

    fn dates(&self) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare("SELECT date FROM schedules ORDER BY date")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for row in rows {
            dates.push(parse_date(&row?)?);
        }
        Ok(dates)
    }
}
