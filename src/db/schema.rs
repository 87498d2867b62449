//! Table definition for the to-do store.

use anyhow::Result;
use rusqlite::Connection;

/// `creation_date` defaults to an RFC 3339 UTC timestamp with milliseconds.
const TODOS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    tasks         TEXT    NOT NULL,
    due_date      TEXT    NOT NULL,
    creation_date TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    completed     INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1))
);
CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed);
";

/// Create the `todos` table if it does not exist yet.
pub fn apply(conn: &Connection) -> Result<()> {
    conn.execute_batch(TODOS_TABLE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("PRAGMA table_info(todos)").unwrap();
        stmt.query_map([], |row| row.get::<_, String>("name"))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn apply_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        apply(&conn).unwrap();

        assert_eq!(
            column_names(&conn),
            vec!["id", "tasks", "due_date", "creation_date", "completed"]
        );
    }

    #[test]
    fn tasks_and_due_date_are_required() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();

        let missing_due = conn.execute("INSERT INTO todos (tasks) VALUES ('x')", []);
        assert!(missing_due.is_err());

        let missing_tasks = conn.execute("INSERT INTO todos (due_date) VALUES ('2024-01-01')", []);
        assert!(missing_tasks.is_err());
    }
}
