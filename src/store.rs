//! The board store: owns every board, tracks the current one, and writes
//! the whole collection back to storage after each change.

use crate::{
    config::StoreConfig,
    domain::{
        summary, AuthoredTask, Board, BoardId, Column, ColumnId, DashboardSummary, NewBoard,
        NewTask, Task, TaskId,
    },
    error::{Result, TaskboardError},
    storage::Storage,
    table::Table,
};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Storage failures reach callers as `Persistence`
fn persistence(err: TaskboardError) -> TaskboardError {
    match err {
        TaskboardError::Persistence(_) => err,
        other => TaskboardError::Persistence(other.to_string()),
    }
}

/// In-memory board collection backed by a [`Storage`].
///
/// Each mutation builds a complete replacement collection, writes it under
/// the configured key, and only then swaps it in. A failed write leaves the
/// store as it was.
pub struct BoardStore<S: Storage> {
    storage: S,
    config: StoreConfig,
    boards: Vec<Board>,
    current: Option<BoardId>,
}

impl<S: Storage> BoardStore<S> {
    /// Reads the board collection, creating an empty one if the key is absent
    pub async fn open(storage: S, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        storage.initialize().await.map_err(persistence)?;

        let key = config.storage_key.as_str();
        let mut boards: Vec<Board> = match storage.get(key).await.map_err(persistence)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => {
                storage.set(key, "[]").await.map_err(persistence)?;
                Vec::new()
            }
        };

        for board in &mut boards {
            if board.ensure_column(&config.default_column) {
                warn!(board = %board.id, "stored board had no columns; added a default column");
            }
        }

        info!(key, boards = boards.len(), "board store opened");
        Ok(Self {
            storage,
            config,
            boards,
            current: None,
        })
    }

    /// Writes the collection one last time and releases the storage
    pub async fn close(self) -> Result<S> {
        let json = serde_json::to_string(&self.boards)?;
        self.storage
            .set(&self.config.storage_key, &json)
            .await
            .map_err(persistence)?;
        info!(boards = self.boards.len(), "board store closed");
        Ok(self.storage)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn current_id(&self) -> Option<&BoardId> {
        self.current.as_ref()
    }

    /// The board loaded into the view/edit context
    pub fn current(&self) -> Option<&Board> {
        self.current.as_ref().and_then(|id| self.board(id))
    }

    async fn commit(&mut self, boards: Vec<Board>, current: Option<BoardId>) -> Result<()> {
        let json = serde_json::to_string(&boards)?;
        if let Err(err) = self.storage.set(&self.config.storage_key, &json).await {
            warn!(error = %err, "failed to persist boards; keeping previous state");
            return Err(persistence(err));
        }

        self.boards = boards;
        self.current = current;
        Ok(())
    }

    /// Runs `mutate` on a copy of the current board, then commits the copy
    async fn update_current<T, F>(&mut self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Board, &str) -> Result<T>,
    {
        let id = self.current.clone().ok_or(TaskboardError::NoBoardLoaded)?;
        let index = self
            .boards
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| TaskboardError::BoardNotFound(id.to_string()))?;

        let mut boards = self.boards.clone();
        let value = mutate(&mut boards[index], &self.config.default_column)?;
        self.commit(boards, Some(id)).await?;
        Ok(value)
    }

    /// Creates a board with one default column and makes it current
    pub async fn add_board(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<BoardId> {
        let new_board = NewBoard {
            name: name.into(),
            description,
        };
        let board = Board::new(new_board, &self.config.default_column);
        let id = board.id.clone();

        let mut boards = self.boards.clone();
        boards.push(board);
        self.commit(boards, Some(id.clone())).await?;

        info!(board = %id, "board created");
        Ok(id)
    }

    /// Removes a board with its columns and tasks. If it was current, the
    /// first remaining board becomes current.
    pub async fn delete_board(&mut self, id: &BoardId) -> Result<Board> {
        let index = self
            .boards
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| TaskboardError::BoardNotFound(id.to_string()))?;

        let mut boards = self.boards.clone();
        let removed = boards.remove(index);

        let current = if self.current.as_ref() == Some(id) {
            boards.first().map(|b| b.id.clone())
        } else {
            self.current.clone()
        };

        self.commit(boards, current).await?;
        info!(board = %id, "board deleted");
        Ok(removed)
    }

    /// Makes the stored board with `id` current
    pub fn load_board(&mut self, id: &BoardId) -> Result<&Board> {
        let index = self
            .boards
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| TaskboardError::BoardNotFound(id.to_string()))?;

        self.current = Some(id.clone());
        debug!(board = %id, "board loaded");
        Ok(&self.boards[index])
    }

    pub async fn add_column(&mut self, name: impl Into<String>) -> Result<ColumnId> {
        let name = name.into();
        let id = self
            .update_current(|board, _| Ok(board.add_column(name)))
            .await?;
        debug!(column = %id, "column added");
        Ok(id)
    }

    /// Removes a column and its tasks from the current board
    pub async fn delete_column(&mut self, column_id: &ColumnId) -> Result<Column> {
        let removed = self
            .update_current(|board, default_column| board.remove_column(column_id, default_column))
            .await?;
        debug!(column = %column_id, tasks = removed.tasks.len(), "column deleted");
        Ok(removed)
    }

    pub async fn update_column(
        &mut self,
        column_id: &ColumnId,
        name: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        self.update_current(|board, _| board.rename_column(column_id, name))
            .await
    }

    /// Appends a new task, stamped with the configured author, to a column
    pub async fn add_task(&mut self, column_id: &ColumnId, new_task: NewTask) -> Result<Task> {
        let task = Task::from_new(new_task, self.config.author.clone());
        let created = task.clone();

        self.update_current(|board, _| board.push_task(column_id, task))
            .await?;
        debug!(task = %created.id, column = %column_id, "task added");
        Ok(created)
    }

    pub async fn update_task(&mut self, column_id: &ColumnId, task: Task) -> Result<()> {
        self.update_current(|board, _| board.replace_task(column_id, task))
            .await
    }

    pub async fn delete_task(&mut self, column_id: &ColumnId, task_id: &TaskId) -> Result<Task> {
        self.update_current(|board, _| board.remove_task(column_id, task_id))
            .await
    }

    /// Moves a task to `new_index` in `to`, which may be the same column
    pub async fn move_task(
        &mut self,
        from: &ColumnId,
        to: &ColumnId,
        task_id: &TaskId,
        new_index: usize,
    ) -> Result<()> {
        self.update_current(|board, _| board.move_task(from, to, task_id, new_index))
            .await?;
        debug!(task = %task_id, from = %from, to = %to, new_index, "task moved");
        Ok(())
    }

    /// Tasks created by the configured author across all boards
    pub fn my_tasks(&self) -> Vec<AuthoredTask> {
        summary::tasks_by_author(&self.boards, &self.config.author)
    }

    /// The author's tasks as a table, paged by the configured page size
    pub fn my_tasks_table(&self) -> Result<Table> {
        Ok(Table::from_items(&self.my_tasks())?.with_page_size(self.config.page_size))
    }

    /// Dashboard counters for the configured author
    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary::compute(
            &self.boards,
            &self.config.author,
            today,
            self.config.due_soon_days,
        )
    }
}
