//! Todo statements. Each method issues exactly one statement.

use super::{Database, QueryResult};
use crate::types::Todo;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Row, Statement, params};

pub fn parse_todo_row(row: &Row) -> rusqlite::Result<Todo> {
    let id: i64 = row.get("id")?;
    let tasks: String = row.get("tasks")?;
    let due_date: String = row.get("due_date")?;
    let creation_date: String = row.get("creation_date")?;
    let completed: bool = row.get("completed")?;

    let creation_date = DateTime::parse_from_rfc3339(&creation_date)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            let stmt: &Statement<'_> = row.as_ref();
            let idx = stmt.column_index("creation_date").unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })?;

    Ok(Todo {
        id,
        tasks,
        due_date,
        creation_date,
        completed,
    })
}

impl Database {
    /// All todos, incomplete first.
    pub fn list_todos(&self) -> Result<QueryResult<Todo>> {
        self.query(
            "SELECT * FROM todos ORDER BY completed, id",
            [],
            parse_todo_row,
        )
    }

    /// Insert a todo and return the stored row.
    ///
    /// With `completed` unset the store default applies.
    pub fn insert_todo(
        &self,
        tasks: &str,
        due_date: &str,
        completed: Option<bool>,
    ) -> Result<QueryResult<Todo>> {
        match completed {
            Some(completed) => self.query(
                "INSERT INTO todos (tasks, due_date, completed) VALUES (?1, ?2, ?3) RETURNING *",
                params![tasks, due_date, completed],
                parse_todo_row,
            ),
            None => self.query(
                "INSERT INTO todos (tasks, due_date) VALUES (?1, ?2) RETURNING *",
                params![tasks, due_date],
                parse_todo_row,
            ),
        }
    }

    pub fn find_todo(&self, id: i64) -> Result<QueryResult<Todo>> {
        self.query(
            "SELECT * FROM todos WHERE id = ?1",
            params![id],
            parse_todo_row,
        )
    }

    /// Delete by id. `row_count` is the number of rows removed.
    pub fn delete_todo(&self, id: i64) -> Result<QueryResult<Todo>> {
        self.query(
            "DELETE FROM todos WHERE id = ?1",
            params![id],
            parse_todo_row,
        )
    }

    /// Replace `tasks` and `due_date`. `completed` and `creation_date` are
    /// left as they are; no rows are returned.
    pub fn update_todo(&self, id: i64, tasks: &str, due_date: &str) -> Result<QueryResult<Todo>> {
        self.query(
            "UPDATE todos SET tasks = ?1, due_date = ?2 WHERE id = ?3",
            params![tasks, due_date, id],
            parse_todo_row,
        )
    }

    /// Flip `completed` and return the updated row.
    pub fn toggle_todo(&self, id: i64) -> Result<QueryResult<Todo>> {
        self.query(
            "UPDATE todos SET completed = NOT completed WHERE id = ?1 RETURNING *",
            params![id],
            parse_todo_row,
        )
    }
}
