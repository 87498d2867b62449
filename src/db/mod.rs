//! Record store for the to-do backend.

pub mod schema;
pub mod todos;

use anyhow::{Result, anyhow};
use rusqlite::{Connection, Params, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Rows returned by a statement together with its row count.
///
/// For statements that produce columns (`SELECT`, or DML with `RETURNING`)
/// `row_count` is the number of rows read. For statements without result
/// columns it is the number of rows changed and `rows` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<T> {
    pub row_count: usize,
    pub rows: Vec<T>,
}

impl<T> QueryResult<T> {
    /// The matched row, only when exactly one row matched.
    pub fn single(self) -> Option<T> {
        if self.row_count == 1 {
            self.rows.into_iter().next()
        } else {
            None
        }
    }
}

/// Database handle wrapping a single shared SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for concurrent readers, and wait on locks instead of failing
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )?;

        Self::with_schema(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_schema(conn)
    }

    fn with_schema(conn: Connection) -> Result<Self> {
        // Create the table on first open; existing files are left alone
        schema::apply(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a function with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        f(&conn)
    }

    /// Run one parameterized statement and map any rows it returns.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> Result<QueryResult<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(sql)?;

            // No result columns: plain DML, so report rows changed.
            // SELECT and RETURNING statements report rows read instead.
            if stmt.column_count() == 0 {
                let row_count = stmt.execute(params)?;
                return Ok(QueryResult {
                    row_count,
                    rows: Vec::new(),
                });
            }

            let rows = stmt
                .query_map(params, map_row)?
                .collect::<rusqlite::Result<Vec<T>>>()?;

            Ok(QueryResult {
                row_count: rows.len(),
                rows,
            })
        })
    }

    /// Check that the store answers and the `todos` table is readable.
    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    /// Close the connection.
    ///
    /// Only the last handle actually closes; earlier calls just drop their
    /// reference and return `Ok(false)`.
    pub fn close(self) -> Result<bool> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            return Ok(false);
        };
        let conn = mutex
            .into_inner()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        conn.close().map_err(|(_, e)| e)?;
        Ok(true)
    }
}
