use async_trait::async_trait;

use crate::article::errors::ArticleError;
use crate::article::models::Article;
use crate::user::models::UserId;

/// Read-side persistence operations for articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Retrieve all articles authored by a user, newest first.
    ///
    /// An author with no articles yields an empty vector, not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Article>, ArticleError>;
}
