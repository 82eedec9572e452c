//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections, and
//! the savepoint wrapper every multi-row write runs inside.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection: foreign keys on, WAL journal
///
/// Foreign keys must be on for group deletion to cascade. In-memory
/// databases keep their `memory` journal; the reported mode is ignored.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(from_rusqlite)?;

    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "Configured connection");

    Ok(())
}

/// Run `f` inside a named savepoint.
///
/// The savepoint is released when `f` succeeds and rolled back when it
/// fails, so no partial write of `f` survives an error. Outside any
/// transaction, releasing the outermost savepoint commits; inside a
/// caller's transaction it nests and the caller keeps control.
///
/// `name` must be a plain SQL identifier.
///
/// # Errors
///
/// Whatever `f` returns, or a `Persistence` error if the savepoint itself
/// cannot be opened or released.
pub fn with_savepoint<T, F>(conn: &Connection, name: &str, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> Result<T>,
{
    conn.execute_batch(&format!("SAVEPOINT {name}"))
        .map_err(from_rusqlite)?;

    let outcome = f(conn).and_then(|value| {
        conn.execute_batch(&format!("RELEASE {name}"))
            .map_err(from_rusqlite)?;
        Ok(value)
    });

    if outcome.is_err() {
        if let Err(err) = conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}")) {
            tracing::warn!(savepoint = name, error = %err, "Savepoint rollback failed");
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitledger_core::errors::{ExError, ExErrorKind};

    fn scratch() -> Connection {
        let conn = open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)")
            .unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_savepoint_commits_on_success() {
        let conn = scratch();
        with_savepoint(&conn, "sp_ok", |c| {
            c.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count(&conn), 1);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn test_savepoint_rolls_back_on_error() {
        let conn = scratch();
        let result: Result<()> = with_savepoint(&conn, "sp_err", |c| {
            c.execute("INSERT INTO t (v) VALUES (1)", [])
                .map_err(from_rusqlite)?;
            Err(ExError::new(ExErrorKind::Internal).with_message("boom"))
        });
        assert_eq!(result.unwrap_err().kind(), ExErrorKind::Internal);
        assert_eq!(count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn test_nested_savepoint_inside_transaction_defers_to_caller() {
        let mut conn = scratch();
        {
            let tx = conn.transaction().unwrap();
            with_savepoint(&tx, "sp_nested", |c| {
                c.execute("INSERT INTO t (v) VALUES (1)", [])
                    .map_err(from_rusqlite)?;
                Ok(())
            })
            .unwrap();
            tx.rollback().unwrap();
        }
        assert_eq!(count(&conn), 0);
    }
}
