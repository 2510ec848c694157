use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("No board loaded")]
    NoBoardLoaded,

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid priority '{0}'. Valid priorities: high, medium, low")]
    InvalidPriority(String),

    #[error("Invalid sort direction '{0}'. Valid directions: asc, dsc")]
    InvalidSortDirection(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TaskboardError {
    pub(crate) fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// True for errors raised because a referenced board, column or task
    /// does not exist. Callers that treat stale references as no-ops can
    /// match on this and move on.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound(_)
                | Self::ColumnNotFound(_)
                | Self::TaskNotFound(_)
                | Self::NoBoardLoaded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(TaskboardError::BoardNotFound("b1".to_string()).is_not_found());
        assert!(TaskboardError::ColumnNotFound("c1".to_string()).is_not_found());
        assert!(TaskboardError::TaskNotFound("t1".to_string()).is_not_found());
        assert!(TaskboardError::NoBoardLoaded.is_not_found());
        assert!(!TaskboardError::Persistence("disk full".to_string()).is_not_found());
    }

    #[test]
    fn test_validation_message() {
        let err = TaskboardError::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "Invalid name: must not be empty");
    }
}
