use crate::domain::board::{Board, Column};
use crate::domain::task::{Priority, Task};
use chrono::NaiveDate;

/// Narrows the tasks shown on a board.
///
/// An unset criterion matches everything. The query is matched as a
/// case-insensitive substring of title or description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.priority.is_none() && self.due_date.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.query.to_lowercase();
        task.matches_text(&needle)
            && self.priority.map_or(true, |p| task.priority == p)
            && self.due_date.map_or(true, |d| task.due_date == Some(d))
    }

    /// Returns the board's columns, in order, holding only matching tasks.
    /// Columns are kept even when nothing in them matches.
    pub fn apply(&self, board: &Board) -> Vec<Column> {
        board
            .columns
            .iter()
            .map(|column| Column {
                id: column.id.clone(),
                name: column.name.clone(),
                tasks: column
                    .tasks
                    .iter()
                    .filter(|t| self.matches(t))
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}
