use crate::domain::id::{BoardId, ColumnId, TaskId};
use crate::domain::task::Task;
use crate::error::{Result, TaskboardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered bucket of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ColumnId::generate(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    fn task_position(&self, task_id: &TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| &t.id == task_id)
            .ok_or_else(|| TaskboardError::TaskNotFound(task_id.to_string()))
    }
}

/// Fields collected by the create-board form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBoard {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TaskboardError::validation("board name", "must not be empty"));
        }
        Ok(())
    }
}

/// Rejects a blank column name
pub fn validate_column_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TaskboardError::validation("column name", "must not be empty"));
    }
    Ok(())
}

/// Kanban board: an ordered list of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// Creates a board holding a single column named `default_column`
    pub fn new(new_board: NewBoard, default_column: &str) -> Self {
        Self {
            id: BoardId::generate(),
            name: new_board.name,
            description: new_board.description,
            created_at: Utc::now(),
            columns: vec![Column::new(default_column)],
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    fn column_index(&self, id: &ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| TaskboardError::ColumnNotFound(id.to_string()))
    }

    /// Finds a task and the column that owns it
    pub fn find_task(&self, task_id: &TaskId) -> Option<(&Column, &Task)> {
        self.columns.iter().find_map(|c| {
            c.tasks
                .iter()
                .find(|t| &t.id == task_id)
                .map(|t| (c, t))
        })
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Synthesizes a default column if the board has none.
    /// Returns true when a column was added.
    pub fn ensure_column(&mut self, default_column: &str) -> bool {
        if self.columns.is_empty() {
            self.columns.push(Column::new(default_column));
            true
        } else {
            false
        }
    }

    /// Appends a column and returns its id
    pub fn add_column(&mut self, name: impl Into<String>) -> ColumnId {
        let column = Column::new(name);
        let id = column.id.clone();
        self.columns.push(column);
        id
    }

    /// Removes a column and its tasks. A board is never left without columns.
    pub fn remove_column(&mut self, id: &ColumnId, default_column: &str) -> Result<Column> {
        let index = self.column_index(id)?;
        let removed = self.columns.remove(index);
        self.ensure_column(default_column);
        Ok(removed)
    }

    pub fn rename_column(&mut self, id: &ColumnId, name: impl Into<String>) -> Result<()> {
        let index = self.column_index(id)?;
        self.columns[index].name = name.into();
        Ok(())
    }

    /// Appends a task to the end of a column
    pub fn push_task(&mut self, column_id: &ColumnId, task: Task) -> Result<()> {
        let index = self.column_index(column_id)?;
        self.columns[index].tasks.push(task);
        Ok(())
    }

    /// Replaces the task whose id matches `task.id` within a column
    pub fn replace_task(&mut self, column_id: &ColumnId, task: Task) -> Result<()> {
        let index = self.column_index(column_id)?;
        let column = &mut self.columns[index];
        let position = column.task_position(&task.id)?;
        column.tasks[position] = task;
        Ok(())
    }

    pub fn remove_task(&mut self, column_id: &ColumnId, task_id: &TaskId) -> Result<Task> {
        let index = self.column_index(column_id)?;
        let column = &mut self.columns[index];
        let position = column.task_position(task_id)?;
        Ok(column.tasks.remove(position))
    }

    /// Moves a task to `new_index` of the target column.
    ///
    /// The task is removed from its source first, then `new_index` is
    /// clamped to the length of the target list. For a same-column move the
    /// task ends up at `new_index` and every other task keeps its relative
    /// order. Lookups happen before any mutation, so a failed move leaves
    /// the board unchanged.
    pub fn move_task(
        &mut self,
        from: &ColumnId,
        to: &ColumnId,
        task_id: &TaskId,
        new_index: usize,
    ) -> Result<()> {
        let from_index = self.column_index(from)?;
        let to_index = self.column_index(to)?;
        let position = self.columns[from_index].task_position(task_id)?;

        let task = self.columns[from_index].tasks.remove(position);
        let target = &mut self.columns[to_index].tasks;
        let index = new_index.min(target.len());
        target.insert(index, task);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{NewTask, Priority};
    use chrono::NaiveDate;

    fn task(title: &str) -> Task {
        let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Task::from_new(NewTask::new(title, Priority::Medium, due), "me")
    }

    fn titles(column: &Column) -> Vec<&str> {
        column.tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn board_with_tasks(titles: &[&str]) -> (Board, ColumnId) {
        let mut board = Board::new(NewBoard::new("Sprint"), "To Do");
        let col = board.columns[0].id.clone();
        for t in titles {
            board.push_task(&col, task(t)).unwrap();
        }
        (board, col)
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new(NewBoard::new("Sprint 1").with_description("first"), "To Do");
        assert_eq!(board.name, "Sprint 1");
        assert_eq!(board.description.as_deref(), Some("first"));
        assert_eq!(board.columns.len(), 1);
        assert_eq!(board.columns[0].name, "To Do");
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn test_remove_last_column_synthesizes_default() {
        let (mut board, col) = board_with_tasks(&["a"]);
        let removed = board.remove_column(&col, "To Do").unwrap();

        assert_eq!(removed.tasks.len(), 1);
        assert_eq!(board.columns.len(), 1);
        assert_ne!(board.columns[0].id, col);
        assert!(board.columns[0].tasks.is_empty());
    }

    #[test]
    fn test_remove_column_leaves_others_untouched() {
        let (mut board, first) = board_with_tasks(&["a", "b"]);
        let second = board.add_column("Doing");
        board.push_task(&second, task("c")).unwrap();

        board.remove_column(&second, "To Do").unwrap();

        assert_eq!(board.columns.len(), 1);
        assert_eq!(board.columns[0].id, first);
        assert_eq!(titles(&board.columns[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_rename_column() {
        let (mut board, col) = board_with_tasks(&[]);
        board.rename_column(&col, "Backlog").unwrap();
        assert_eq!(board.column(&col).unwrap().name, "Backlog");

        let missing = ColumnId::from("nope");
        assert!(matches!(
            board.rename_column(&missing, "x"),
            Err(TaskboardError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_replace_and_remove_task() {
        let (mut board, col) = board_with_tasks(&["a", "b"]);
        let mut edited = board.columns[0].tasks[1].clone();
        edited.set_title("b2".to_string());
        edited.set_priority(Priority::High);

        board.replace_task(&col, edited.clone()).unwrap();
        assert_eq!(board.columns[0].tasks[1], edited);

        let removed = board.remove_task(&col, &edited.id).unwrap();
        assert_eq!(removed.title, "b2");
        assert_eq!(titles(&board.columns[0]), vec!["a"]);

        assert!(matches!(
            board.remove_task(&col, &edited.id),
            Err(TaskboardError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_move_within_column_every_index_pair() {
        let names = ["a", "b", "c", "d"];
        for from in 0..names.len() {
            for to in 0..names.len() {
                let (mut board, col) = board_with_tasks(&names);
                let moved = board.columns[0].tasks[from].id.clone();

                board.move_task(&col, &col, &moved, to).unwrap();

                let tasks = &board.columns[0].tasks;
                assert_eq!(tasks.len(), names.len());
                assert_eq!(tasks[to].id, moved);

                let mut expected: Vec<&str> = names.to_vec();
                let item = expected.remove(from);
                expected.insert(to, item);
                assert_eq!(titles(&board.columns[0]), expected);
            }
        }
    }

    #[test]
    fn test_move_across_columns() {
        let (mut board, todo) = board_with_tasks(&["a", "b"]);
        let done = board.add_column("Done");
        board.push_task(&done, task("x")).unwrap();
        board.push_task(&done, task("y")).unwrap();
        let moved = board.columns[0].tasks[0].id.clone();

        board.move_task(&todo, &done, &moved, 1).unwrap();

        assert_eq!(titles(board.column(&todo).unwrap()), vec!["b"]);
        assert_eq!(titles(board.column(&done).unwrap()), vec!["x", "a", "y"]);
        let occurrences = board
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .filter(|t| t.id == moved)
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn test_move_clamps_index() {
        let (mut board, todo) = board_with_tasks(&["a"]);
        let done = board.add_column("Done");
        board.push_task(&done, task("x")).unwrap();
        let moved = board.columns[0].tasks[0].id.clone();

        board.move_task(&todo, &done, &moved, 99).unwrap();
        assert_eq!(titles(board.column(&done).unwrap()), vec!["x", "a"]);
    }

    #[test]
    fn test_failed_move_leaves_board_unchanged() {
        let (mut board, todo) = board_with_tasks(&["a"]);
        let before = board.clone();
        let moved = board.columns[0].tasks[0].id.clone();

        let result = board.move_task(&todo, &ColumnId::from("missing"), &moved, 0);
        assert!(matches!(result, Err(TaskboardError::ColumnNotFound(_))));
        assert_eq!(board, before);

        let result = board.move_task(&todo, &todo, &TaskId::from("missing"), 0);
        assert!(matches!(result, Err(TaskboardError::TaskNotFound(_))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_find_task() {
        let (board, col) = board_with_tasks(&["a", "b"]);
        let id = board.columns[0].tasks[1].id.clone();
        let (column, found) = board.find_task(&id).unwrap();
        assert_eq!(column.id, col);
        assert_eq!(found.title, "b");
        assert!(board.find_task(&TaskId::from("nope")).is_none());
    }

    #[test]
    fn test_new_board_validation() {
        assert!(NewBoard::new("Sprint").validate().is_ok());
        assert!(NewBoard::new("  ").validate().is_err());
        assert!(validate_column_name("").is_err());
        assert!(validate_column_name("Doing").is_ok());
    }

    #[test]
    fn test_board_json_layout() {
        let board = Board::new(NewBoard::new("Sprint"), "To Do");
        let value = serde_json::to_value(&board).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("description").is_none());
        assert_eq!(value["columns"][0]["name"], "To Do");
        assert!(value["columns"][0]["tasks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_board_without_columns_deserializes() {
        let json = r#"{
            "id": "1",
            "name": "Legacy",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let mut board: Board = serde_json::from_str(json).unwrap();
        assert!(board.columns.is_empty());
        assert!(board.ensure_column("To Do"));
        assert_eq!(board.columns.len(), 1);
        assert!(!board.ensure_column("To Do"));
    }
}
