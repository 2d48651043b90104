use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::data::{ListName, ListStore};

/// SQLite-backed saved-video lists. A row is (list_name, video_id); list
/// order is insertion order, and a moved row keeps its original position.
#[derive(Debug, Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Default, Clone)]
pub struct Options {
    pub path: Option<PathBuf>,
}

impl Store {
    pub fn open(opts: Options) -> Result<Self> {
        let path = if let Some(path) = opts.path {
            path
        } else {
            default_path().context("storage: resolve default path")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("storage: create directory {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("storage: open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", &"WAL")
            .context("storage: set WAL")?;
        conn.pragma_update(None, "busy_timeout", &5000)
            .context("storage: set busy timeout")?;
        migrate(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn close(self) -> Result<()> {
        let conn = Arc::try_unwrap(self.conn)
            .map_err(|_| anyhow!("storage: connection still in use"))?
            .into_inner();
        conn.close()
            .map_err(|(_, err)| err)
            .context("storage: close connection")
    }
}

impl ListStore for Store {
    fn get_all(&self, list: ListName) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            r#"
SELECT video_id FROM saved_videos
WHERE list_name = ?1
ORDER BY id ASC
"#,
        )?;
        let rows = stmt
            .query_map(params![list.as_str()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
    }

    fn add(&self, list: ListName, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            bail!("storage: video id required");
        }
        let conn = self.conn.lock();
        conn.execute(
            r#"
INSERT INTO saved_videos (list_name, video_id, saved_at)
VALUES (?1, ?2, ?3)
ON CONFLICT(list_name, video_id) DO NOTHING
"#,
            params![list.as_str(), id, Utc::now().timestamp()],
        )
        .context("storage: insert saved video")?;
        Ok(())
    }

    fn move_entry(&self, from: ListName, to: ListName, id: &str) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let conn = self.conn.lock();
        conn.execute(
            r#"
UPDATE OR IGNORE saved_videos SET list_name = ?1
WHERE list_name = ?2 AND video_id = ?3
"#,
            params![to.as_str(), from.as_str(), id],
        )
        .context("storage: move saved video")?;
        // Leftover row remains only when the target list already held the id.
        conn.execute(
            "DELETE FROM saved_videos WHERE list_name = ?1 AND video_id = ?2",
            params![from.as_str(), id],
        )
        .context("storage: drop source row after move")?;
        Ok(())
    }

    fn remove(&self, list: ListName, id: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "DELETE FROM saved_videos WHERE list_name = ?1 AND video_id = ?2",
            params![list.as_str(), id],
        )
        .context("storage: remove saved video")?;
        Ok(())
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
  version INTEGER PRIMARY KEY,
  applied_at INTEGER NOT NULL
)
"#,
        [],
    )?;

    let current: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    for (idx, sql) in migrations().iter().enumerate() {
        let version = (idx + 1) as i64;
        if version <= current {
            continue;
        }
        conn.execute_batch(sql)?;
        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![version, Utc::now().timestamp()],
        )?;
    }
    Ok(())
}

fn migrations() -> Vec<&'static str> {
    vec![
        r#"
CREATE TABLE IF NOT EXISTS saved_videos (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  list_name TEXT NOT NULL,
  video_id TEXT NOT NULL,
  saved_at INTEGER NOT NULL,
  UNIQUE(list_name, video_id)
);

CREATE INDEX IF NOT EXISTS idx_saved_videos_list ON saved_videos(list_name);
"#,
    ]
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vidstash").join("state.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(Options {
            path: Some(dir.path().join("state.db")),
        })
        .unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");
        let store = Store::open(Options {
            path: Some(path.clone()),
        })
        .unwrap();
        assert!(path.exists());
        store.close().unwrap();
    }

    #[test]
    fn add_preserves_insertion_order_and_ignores_duplicates() {
        let (_dir, store) = open_temp();
        store.add(ListName::Unwatched, "v1").unwrap();
        store.add(ListName::Unwatched, "v2").unwrap();
        store.add(ListName::Unwatched, "v1").unwrap();
        assert_eq!(store.get_all(ListName::Unwatched).unwrap(), ["v1", "v2"]);
        assert!(store.get_all(ListName::Watched).unwrap().is_empty());
    }

    #[test]
    fn add_rejects_blank_id() {
        let (_dir, store) = open_temp();
        assert!(store.add(ListName::Unwatched, "  ").is_err());
    }

    #[test]
    fn move_entry_switches_lists() {
        let (_dir, store) = open_temp();
        store.add(ListName::Unwatched, "v1").unwrap();
        store.add(ListName::Unwatched, "v2").unwrap();
        store
            .move_entry(ListName::Unwatched, ListName::Watched, "v1")
            .unwrap();
        assert_eq!(store.get_all(ListName::Unwatched).unwrap(), ["v2"]);
        assert_eq!(store.get_all(ListName::Watched).unwrap(), ["v1"]);
    }

    #[test]
    fn move_entry_collapses_into_existing_target_row() {
        let (_dir, store) = open_temp();
        store.add(ListName::Unwatched, "v1").unwrap();
        store.add(ListName::Watched, "v1").unwrap();
        store
            .move_entry(ListName::Unwatched, ListName::Watched, "v1")
            .unwrap();
        assert!(store.get_all(ListName::Unwatched).unwrap().is_empty());
        assert_eq!(store.get_all(ListName::Watched).unwrap(), ["v1"]);
    }

    #[test]
    fn remove_deletes_only_from_named_list() {
        let (_dir, store) = open_temp();
        store.add(ListName::Unwatched, "v1").unwrap();
        store.add(ListName::Watched, "v1").unwrap();
        store.remove(ListName::Unwatched, "v1").unwrap();
        assert!(store.get_all(ListName::Unwatched).unwrap().is_empty());
        assert_eq!(store.get_all(ListName::Watched).unwrap(), ["v1"]);
    }
}
