use thiserror::Error;

/// Error for article lookup operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
