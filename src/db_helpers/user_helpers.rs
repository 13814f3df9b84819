use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

const USER_COLUMNS: &str = "id, username, password, created_at";

pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<i64, RequestError> {
    let (id,) = sqlx::query_as::<Sqlite, (i64,)>(
        r#"
        INSERT INTO users (username, password, created_at)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, RequestError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, RequestError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}
