//! # Taskboard Core
//!
//! State management for kanban task boards: boards hold ordered columns,
//! columns hold ordered tasks, and the whole collection is persisted to a
//! local key-value store after every change.
//!
//! The crate also carries the table helpers (search, sort, pagination) and
//! the cross-board task summaries a board UI is built from. It has no
//! dependency on any particular UI.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;
pub mod table;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::{Board, Column, NewBoard},
    filter::TaskFilter,
    id::{BoardId, ColumnId, TaskId},
    summary::{AuthoredTask, DashboardSummary},
    task::{NewTask, Priority, Task},
};
pub use error::{Result, TaskboardError};
pub use storage::{MemoryStorage, Storage};
pub use store::BoardStore;
pub use table::{Table, TableView};
