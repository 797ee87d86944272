//! SQLite-backed key-value store

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::backend::KeyValueStore;
use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL mode so a crash mid-write never leaves a torn value
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM records WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::trace!(key = %key, bytes = value.len(), "Stored record");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM records WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM records ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_set_get_remove() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.get_item("userId").unwrap(), None);

        db.set_item("userId", "user_1_abc").unwrap();
        assert_eq!(db.get_item("userId").unwrap().as_deref(), Some("user_1_abc"));

        // Whole-value replacement
        db.set_item("userId", "user_2_def").unwrap();
        assert_eq!(db.get_item("userId").unwrap().as_deref(), Some("user_2_def"));

        db.remove_item("userId").unwrap();
        assert!(!db.contains_key("userId").unwrap());

        // Removing a missing key is fine
        db.remove_item("userId").unwrap();
    }

    #[test]
    fn test_keys_and_shared_clone() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();

        db.set_item("b", "2").unwrap();
        other.set_item("a", "1").unwrap();

        assert_eq!(db.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_reopen_file_keeps_values() {
        let dir = std::env::temp_dir().join(format!("lingo-storage-{}", std::process::id()));
        let path = dir.join("records.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_item("k", "v").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("v"));

        drop(db);
        let _ = std::fs::remove_dir_all(dir);
    }
}
