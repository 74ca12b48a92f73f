use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

pub struct Db {
    conn: Mutex<Connection>,
}

#[derive(Debug, Clone)]
pub struct LoggedMessage {
    pub timestamp: i64,
    pub source: String,
    pub target: String,
    pub channel: Option<String>,
    pub text: String,
    pub direction: String,
}

impl Db {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS messages (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp  INTEGER NOT NULL,
                source     TEXT NOT NULL,
                target     TEXT NOT NULL,
                channel    TEXT,
                text       TEXT NOT NULL,
                direction  TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn log_message(
        &self,
        source: &str,
        target: &str,
        channel: Option<&str>,
        text: &str,
        direction: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().timestamp();
        conn.execute(
            "INSERT INTO messages (timestamp, source, target, channel, text, direction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![now, source, target, channel, text, direction],
        )?;
        Ok(())
    }

    pub fn message_count(&self, direction: &str) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM messages WHERE direction = ?1",
            params![direction],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    pub fn recent_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<LoggedMessage>, Box<dyn std::error::Error + Send + Sync>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT timestamp, source, target, channel, text, direction
             FROM messages ORDER BY id DESC LIMIT ?1",
        )?;
        let messages = stmt
            .query_map(params![limit as i64], |row| {
                Ok(LoggedMessage {
                    timestamp: row.get(0)?,
                    source: row.get(1)?,
                    target: row.get(2)?,
                    channel: row.get(3)?,
                    text: row.get(4)?,
                    direction: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(messages)
    }
}
