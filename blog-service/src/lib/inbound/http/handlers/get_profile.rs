use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::article::models::Article;
use crate::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Profile read is open to any authenticated caller, not just the owner;
/// only the update path carries an ownership check.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<GetProfileResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.user_service.get_user(&user_id).await?;

    let articles = state.article_repository.find_by_author(&user_id).await?;

    let author = ArticleAuthorData {
        id: user.id.to_string(),
        name: user.name.clone(),
    };
    let articles = articles
        .iter()
        .map(|article| ArticleData::new(article, author.clone()))
        .collect();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetProfileResponseData {
            user: (&user).into(),
            articles,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProfileResponseData {
    pub user: UserData,
    pub articles: Vec<ArticleData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: ArticleAuthorData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleAuthorData {
    pub id: String,
    pub name: String,
}

impl ArticleData {
    fn new(article: &Article, author: ArticleAuthorData) -> Self {
        Self {
            id: article.id.to_string(),
            title: article.title.clone(),
            content: article.content.clone(),
            author,
            created_at: article.created_at,
        }
    }
}
