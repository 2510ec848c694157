pub mod board;
pub mod filter;
pub mod id;
pub mod summary;
pub mod task;

pub use board::{validate_column_name, Board, Column, NewBoard};
pub use filter::TaskFilter;
pub use id::{BoardId, ColumnId, TaskId};
pub use summary::{boards_with_author, due_soon, tasks_by_author, AuthoredTask, DashboardSummary};
pub use task::{NewTask, Priority, Task};
