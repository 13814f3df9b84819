use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Comment};

const COMMENT_QUERY: &str = r#"
    SELECT comments.id         AS "id",
           comments.news_id    AS "news_id",
           comments.author_id  AS "author_id",
           comments.text       AS "text",
           comments.created_at AS "created_at",
           users.username      AS "author_username"
    FROM   comments
           JOIN users ON comments.author_id = users.id
"#;

pub async fn add_comment_to_news_in_db(
    pool: &SqlitePool,
    author_id: i64,
    news_id: i64,
    text: &str,
) -> Result<Comment, RequestError> {
    let mut tx = pool.begin().await?;
    let news = sqlx::query_as::<Sqlite, (i64,)>("SELECT id FROM news WHERE id = $1")
        .bind(news_id)
        .fetch_optional(&mut tx)
        .await?;
    if news.is_none() {
        return Err(RequestError::NotFound);
    }
    let (comment_id,) = sqlx::query_as::<Sqlite, (i64,)>(
        r#"
        INSERT INTO comments (news_id, author_id, text, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(news_id)
    .bind(author_id)
    .bind(text)
    .bind(Utc::now().naive_utc())
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    get_comment_by_id_in_db(pool, comment_id)
        .await?
        .ok_or(RequestError::ServerError)
}

async fn get_comment_by_id_in_db(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Comment>, RequestError> {
    let query = format!("{COMMENT_QUERY} WHERE comments.id = $1");
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

/// The author-scoped lookup behind the edit/delete pages; someone else's
/// comment is simply not found.
pub async fn get_comment_for_author_in_db(
    pool: &SqlitePool,
    author_id: i64,
    id: i64,
) -> Result<Option<Comment>, RequestError> {
    let query = format!("{COMMENT_QUERY} WHERE comments.id = $1 AND comments.author_id = $2");
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(id)
        .bind(author_id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn get_comments_for_news_in_db(
    pool: &SqlitePool,
    news_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let query = format!(
        "{COMMENT_QUERY} WHERE comments.news_id = $1 ORDER BY comments.created_at, comments.id"
    );
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(news_id)
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn update_comment_in_db(
    pool: &SqlitePool,
    author_id: i64,
    id: i64,
    text: &str,
) -> Result<Comment, RequestError> {
    let result = sqlx::query("UPDATE comments SET text = $1 WHERE id = $2 AND author_id = $3")
        .bind(text)
        .bind(id)
        .bind(author_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }
    get_comment_by_id_in_db(pool, id)
        .await?
        .ok_or(RequestError::ServerError)
}

pub async fn delete_comment_in_db(
    pool: &SqlitePool,
    author_id: i64,
    id: i64,
) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND author_id = $2")
        .bind(id)
        .bind(author_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }
    Ok(())
}
