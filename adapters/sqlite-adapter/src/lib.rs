//! sqlite-adapter — SQLite implementation of the UserRepository port for local/dev.
//!
//! Purpose
//! - Provide a lightweight, file-based repository to run the system locally
//!   without external database dependencies.
//! - Implements the `UserRepository` trait from the `domain` crate.
//!
//! Notes
//! - Uses `rusqlite` with the `bundled` feature for portability.
//! - Mutating calls (`save`, `delete`) run inside an explicit transaction:
//!   begin at entry, commit on success; the transaction guard rolls back
//!   when dropped on an error path.

use std::path::Path;
use std::sync::Mutex;

use domain::{CoreError, User, UserRepository};
use rusqlite::{params, Connection};
use tracing::debug;

/// SQLite-backed repository for local development.
pub struct SqliteRepo {
    conn: Mutex<Connection>,
}

impl SqliteRepo {
    /// Open (or create) a SQLite database at the given path and ensure schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let conn = Connection::open(&path).map_err(map_sqerr)?;
        debug!(path = %path.as_ref().display(), "opened sqlite database");
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database, for tests that should not touch disk.
    pub fn new_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(map_sqerr)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Construct from env var `DB_PATH` (defaults to `./data/users.db`).
    pub fn from_env() -> Result<Self, CoreError> {
        let path = std::env::var("DB_PATH").unwrap_or_else(|_| "./data/users.db".to_string());
        // Ensure directory exists
        if let Some(dir) = Path::new(&path).parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        Self::new(path)
    }
}

fn init_schema(conn: &Connection) -> Result<(), CoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        );
        "#,
    )
    .map_err(map_sqerr)?;
    debug!("sqlite schema ready");
    Ok(())
}

fn map_sqerr<E: std::fmt::Display>(e: E) -> CoreError {
    CoreError::Repository(format!("sqlite error: {e}"))
}

fn row_to_user(row: &rusqlite::Row) -> Result<User, CoreError> {
    let id: i64 = row.get(0).map_err(map_sqerr)?;
    let name: String = row.get(1).map_err(map_sqerr)?;
    let email: String = row.get(2).map_err(map_sqerr)?;
    Ok(User {
        id: Some(id),
        name,
        email,
    })
}

impl UserRepository for SqliteRepo {
    fn find_all(&self) -> Result<Vec<User>, CoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let mut stmt = conn
            .prepare("SELECT id, name, email FROM users ORDER BY id")
            .map_err(map_sqerr)?;
        let mut rows = stmt.query([]).map_err(map_sqerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(map_sqerr)? {
            out.push(row_to_user(row)?);
        }
        Ok(out)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, CoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let mut stmt = conn
            .prepare("SELECT id, name, email FROM users WHERE id = ?1")
            .map_err(map_sqerr)?;
        let mut rows = stmt.query(params![id]).map_err(map_sqerr)?;
        if let Some(row) = rows.next().map_err(map_sqerr)? {
            Ok(Some(row_to_user(row)?))
        } else {
            Ok(None)
        }
    }

    fn save(&self, user: User) -> Result<User, CoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let tx = conn.unchecked_transaction().map_err(map_sqerr)?;
        let persisted = match user.id {
            Some(id) => {
                let changed = tx
                    .execute(
                        "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
                        params![user.name, user.email, id],
                    )
                    .map_err(map_sqerr)?;
                if changed == 0 {
                    return Err(CoreError::NotFound);
                }
                user
            }
            None => {
                tx.execute(
                    "INSERT INTO users(name, email) VALUES (?1, ?2)",
                    params![user.name, user.email],
                )
                .map_err(map_sqerr)?;
                let id = tx.last_insert_rowid();
                User {
                    id: Some(id),
                    ..user
                }
            }
        };
        tx.commit().map_err(map_sqerr)?;
        Ok(persisted)
    }

    fn delete(&self, user: &User) -> Result<(), CoreError> {
        let id = user.id.ok_or(CoreError::MissingId)?;
        let conn = self
            .conn
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))?;
        let tx = conn.unchecked_transaction().map_err(map_sqerr)?;
        let changed = tx
            .execute("DELETE FROM users WHERE id = ?1", params![id])
            .map_err(map_sqerr)?;
        if changed == 0 {
            return Err(CoreError::NotFound);
        }
        tx.commit().map_err(map_sqerr)?;
        Ok(())
    }
}
