//! Core types for the to-do backend.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted to-do record.
///
/// `id` and `creation_date` are assigned by the store on insert and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub tasks: String,
    pub due_date: String,
    pub creation_date: DateTime<Utc>,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_with_store_column_names() {
        let todo = Todo {
            id: 7,
            tasks: "Water plants".to_string(),
            due_date: "2024-03-01".to_string(),
            creation_date: Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap(),
            completed: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["tasks"], "Water plants");
        assert_eq!(json["due_date"], "2024-03-01");
        assert_eq!(json["creation_date"], "2024-02-01T09:30:00Z");
        assert_eq!(json["completed"], false);
    }
}
