//! Persistence of detection events.
//!
//! The detection pipeline treats storage as a fire-and-forget collaborator:
//! a failed write is logged by the caller and never blocks a cycle. The
//! SQLite implementation keeps an append-only `detections` table.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{params, Connection};

/// One accepted detection, as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionEvent {
    pub code: String,
    pub timestamp: DateTime<Local>,
    pub confidence: u8,
    pub is_valid: bool,
    /// Operator that triggered a simulated detection; `None` for detections
    /// produced by the camera pipeline.
    pub user_id: Option<i64>,
}

/// Storage contract consumed by the scheduler and the HTTP surface.
pub trait DetectionStore: Send + Sync {
    /// Appends one detection event.
    fn record_detection(&self, event: &DetectionEvent) -> Result<()>;

    /// Most recent events, newest first.
    fn recent_detections(&self, limit: usize) -> Result<Vec<DetectionEvent>>;
}

/// SQLite-backed store. Writes come from the single scheduler thread and
/// reads from occasional HTTP requests, so a mutex around the connection is
/// sufficient.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (and if needed creates) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        Self::initialize(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        let _ = conn.pragma_update(None, "journal_mode", "WAL");

        conn.execute(
            "CREATE TABLE IF NOT EXISTS detections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                postal_code TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                confidence INTEGER NOT NULL,
                is_valid INTEGER NOT NULL,
                user_id INTEGER
            )",
            [],
        )
        .context("failed to create detections table")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl DetectionStore for SqliteStore {
    fn record_detection(&self, event: &DetectionEvent) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO detections (postal_code, timestamp, confidence, is_valid, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.code,
                event.timestamp.to_rfc3339(),
                i64::from(event.confidence),
                event.is_valid,
                event.user_id,
            ],
        )
        .context("failed to insert detection")?;
        Ok(())
    }

    fn recent_detections(&self, limit: usize) -> Result<Vec<DetectionEvent>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT postal_code, timestamp, confidence, is_valid, user_id
             FROM detections
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let mut rows = stmt.query(params![limit as i64])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            let timestamp: String = row.get(1)?;
            events.push(DetectionEvent {
                code: row.get(0)?,
                timestamp: parse_timestamp(&timestamp)?,
                confidence: row.get::<_, i64>(2)? as u8,
                is_valid: row.get(3)?,
                user_id: row.get(4)?,
            });
        }
        Ok(events)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|err| anyhow!("invalid timestamp '{value}': {err}"))
}
