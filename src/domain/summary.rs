//! Cross-board task views: an author's tasks, what is due soon, and the
//! dashboard counters built from them.

use crate::domain::board::Board;
use crate::domain::task::Task;
use chrono::NaiveDate;
use serde::Serialize;

/// A task paired with the name of the board that holds it.
///
/// Serializes flat, so a table can address `boardName` next to the task
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub board_name: String,
}

/// Every task created by `author`, in board then column order
pub fn tasks_by_author(boards: &[Board], author: &str) -> Vec<AuthoredTask> {
    boards
        .iter()
        .flat_map(|board| {
            board
                .columns
                .iter()
                .flat_map(|c| c.tasks.iter())
                .filter(|t| t.created_by == author)
                .map(|t| AuthoredTask {
                    task: t.clone(),
                    board_name: board.name.clone(),
                })
        })
        .collect()
}

/// Tasks due between `today` and `today + window_days`, both inclusive.
/// Tasks without a due date are never due soon.
pub fn due_soon(tasks: &[AuthoredTask], today: NaiveDate, window_days: i64) -> Vec<&AuthoredTask> {
    tasks
        .iter()
        .filter(|t| {
            t.task
                .days_until_due(today)
                .is_some_and(|days| (0..=window_days).contains(&days))
        })
        .collect()
}

/// Number of boards holding at least one task created by `author`
pub fn boards_with_author(boards: &[Board], author: &str) -> usize {
    boards
        .iter()
        .filter(|b| {
            b.columns
                .iter()
                .any(|c| c.tasks.iter().any(|t| t.created_by == author))
        })
        .count()
}

/// Counters shown on the dashboard cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub due_soon_tasks: usize,
    pub boards_with_tasks: usize,
}

impl DashboardSummary {
    pub fn compute(boards: &[Board], author: &str, today: NaiveDate, window_days: i64) -> Self {
        let tasks = tasks_by_author(boards, author);
        Self {
            total_tasks: tasks.len(),
            due_soon_tasks: due_soon(&tasks, today, window_days).len(),
            boards_with_tasks: boards_with_author(boards, author),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::NewBoard;
    use crate::domain::task::{NewTask, Priority};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn board(name: &str, tasks: &[(&str, &str, NaiveDate)]) -> Board {
        let mut board = Board::new(NewBoard::new(name), "To Do");
        let col = board.columns[0].id.clone();
        for (title, author, due) in tasks {
            let task = Task::from_new(NewTask::new(*title, Priority::Medium, *due), *author);
            board.push_task(&col, task).unwrap();
        }
        board
    }

    fn boards() -> Vec<Board> {
        vec![
            board("Alpha", &[("a1", "me", date(1)), ("a2", "sam", date(2))]),
            board("Beta", &[("b1", "me", date(20))]),
            board("Gamma", &[("g1", "sam", date(3))]),
        ]
    }

    #[test]
    fn test_tasks_by_author() {
        let tasks = tasks_by_author(&boards(), "me");
        let pairs: Vec<(&str, &str)> = tasks
            .iter()
            .map(|t| (t.task.title.as_str(), t.board_name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a1", "Alpha"), ("b1", "Beta")]);
    }

    #[test]
    fn test_authored_task_serializes_flat() {
        let tasks = tasks_by_author(&boards(), "me");
        let value = serde_json::to_value(&tasks[0]).unwrap();
        assert_eq!(value["title"], "a1");
        assert_eq!(value["boardName"], "Alpha");
        assert!(value.get("task").is_none());
    }

    #[test]
    fn test_due_soon_window_is_inclusive() {
        let tasks = tasks_by_author(&boards(), "me");

        // a1 due in 0 days, b1 in 19
        assert_eq!(due_soon(&tasks, date(1), 7).len(), 1);
        // a1 overdue, b1 due in exactly 7
        let soon = due_soon(&tasks, date(13), 7);
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].task.title, "b1");
        assert!(due_soon(&tasks, date(12), 7).is_empty());
    }

    #[test]
    fn test_undated_tasks_are_never_due_soon() {
        let mut alpha = board("Alpha", &[("a1", "me", date(1))]);
        let col = alpha.columns[0].id.clone();
        let undated = Task::from_new(NewTask::new("someday", Priority::Low, None), "me");
        alpha.push_task(&col, undated).unwrap();

        let tasks = tasks_by_author(&[alpha], "me");
        assert_eq!(tasks.len(), 2);
        let soon = due_soon(&tasks, date(1), 7);
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].task.title, "a1");
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = DashboardSummary::compute(&boards(), "sam", date(1), 7);
        assert_eq!(
            summary,
            DashboardSummary {
                total_tasks: 2,
                due_soon_tasks: 2,
                boards_with_tasks: 2,
            }
        );

        let nobody = DashboardSummary::compute(&boards(), "nobody", date(1), 7);
        assert_eq!(nobody.total_tasks, 0);
        assert_eq!(nobody.boards_with_tasks, 0);
    }
}
