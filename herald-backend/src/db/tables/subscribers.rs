//! Database methods for the subscribers table

use chrono::Utc;
use rusqlite::Result as SqliteResult;

use crate::db::Database;
use crate::models::Subscriber;

impl Database {
    /// Insert or overwrite the row for `chat_id`, stamping `created_at` with now.
    pub fn upsert_subscriber(&self, chat_id: i64, username: Option<&str>) -> SqliteResult<()> {
        let conn = self.conn();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO subscribers (chat_id, username, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(chat_id) DO UPDATE SET
                username = excluded.username,
                created_at = excluded.created_at",
            rusqlite::params![chat_id, username, now],
        )?;
        Ok(())
    }

    /// Delete the row for `chat_id`. Returns true if a row was deleted.
    pub fn delete_subscriber(&self, chat_id: i64) -> SqliteResult<bool> {
        let conn = self.conn();
        let rows = conn.execute("DELETE FROM subscribers WHERE chat_id = ?1", [chat_id])?;
        Ok(rows > 0)
    }

    pub fn list_subscriber_ids(&self) -> SqliteResult<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT chat_id FROM subscribers")?;
        let ids = stmt.query_map([], |row| row.get(0))?;
        ids.collect()
    }

    pub fn list_subscribers(&self) -> SqliteResult<Vec<Subscriber>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT chat_id, username, created_at FROM subscribers")?;
        let rows = stmt.query_map([], |row| {
            Ok(Subscriber {
                chat_id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        rows.collect()
    }

    pub fn count_subscribers(&self) -> SqliteResult<i64> {
        let conn = self.conn();
        conn.query_row("SELECT COUNT(*) FROM subscribers", [], |row| row.get(0))
    }
}
