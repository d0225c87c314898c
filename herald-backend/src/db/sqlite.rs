use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::warn!("Failed to create database directory {:?}: {}", parent, e);
                }
            }
        }

        let conn = Connection::open(database_url)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init()?;
        Ok(db)
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn init(&self) -> SqliteResult<()> {
        let conn = self.conn();

        // Subscribers table (one row per chat)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS subscribers (
                chat_id INTEGER PRIMARY KEY,
                username TEXT,
                created_at TEXT
            )",
            [],
        )?;

        // Older databases were created before these columns existed
        ensure_column(&conn, "subscribers", "username", "TEXT")?;
        ensure_column(&conn, "subscribers", "created_at", "TEXT")?;

        Ok(())
    }
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> SqliteResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<SqliteResult<Vec<String>>>()?;
    Ok(names.iter().any(|name| name.eq_ignore_ascii_case(column)))
}

fn ensure_column(conn: &Connection, table: &str, column: &str, decl: &str) -> SqliteResult<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }
    log::info!("Adding missing column {}.{}", table, column);
    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, decl),
        [],
    )?;
    Ok(())
}
