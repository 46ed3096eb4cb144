use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::article::errors::ArticleError;
use crate::article::models::Article;
use crate::article::models::ArticleId;
use crate::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Article>, ArticleError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, author_id, created_at
            FROM articles
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(Article {
                    id: ArticleId(
                        row.try_get("id")
                            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
                    ),
                    title: row
                        .try_get("title")
                        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
                    content: row
                        .try_get("content")
                        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
                    author_id: UserId(
                        row.try_get("author_id")
                            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
                    ),
                    created_at: row
                        .try_get("created_at")
                        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
                })
            })
            .collect()
    }
}
