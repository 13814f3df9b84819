use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::News};

/// The home page cap, the original project's `NEWS_COUNT_ON_HOME_PAGE`.
pub const NEWS_PER_PAGE: i64 = 10;

pub async fn list_news_in_db(pool: &SqlitePool, page: u32) -> Result<Vec<News>, RequestError> {
    let offset = (page.max(1) as i64 - 1) * NEWS_PER_PAGE;
    let result = sqlx::query_as::<Sqlite, News>(
        r#"
        SELECT id, title, text, date FROM news
        ORDER BY date DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(NEWS_PER_PAGE)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn get_news_by_id_in_db(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<News>, RequestError> {
    let result = sqlx::query_as::<Sqlite, News>("SELECT id, title, text, date FROM news WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

/// News items are published out of band (there is no public create route);
/// this is the seeding path for fixtures.
pub async fn insert_news_in_db(
    pool: &SqlitePool,
    title: &str,
    text: &str,
    date: Option<NaiveDate>,
) -> Result<News, RequestError> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let result = sqlx::query_as::<Sqlite, News>(
        r#"
        INSERT INTO news (title, text, date)
        VALUES ($1, $2, $3)
        RETURNING id, title, text, date
        "#,
    )
    .bind(title)
    .bind(text)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(result)
}
