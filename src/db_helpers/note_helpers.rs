use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Note};

const NOTE_QUERY: &str = r#"
    SELECT notes.id        AS "id",
           notes.title     AS "title",
           notes.text      AS "text",
           notes.slug      AS "slug",
           notes.author_id AS "author_id",
           users.username  AS "author_username"
    FROM   notes
           JOIN users ON notes.author_id = users.id
"#;

pub async fn list_notes_for_author_in_db(
    pool: &SqlitePool,
    author_id: i64,
) -> Result<Vec<Note>, RequestError> {
    let query = format!("{NOTE_QUERY} WHERE notes.author_id = $1 ORDER BY notes.id");
    let result = sqlx::query_as::<Sqlite, Note>(&query)
        .bind(author_id)
        .fetch_all(pool)
        .await?;
    Ok(result)
}

/// Author-scoped lookup; a slug belonging to someone else is not found.
pub async fn get_note_by_slug_in_db(
    pool: &SqlitePool,
    author_id: i64,
    slug: &str,
) -> Result<Option<Note>, RequestError> {
    let query = format!("{NOTE_QUERY} WHERE notes.slug = $1 AND notes.author_id = $2");
    let result = sqlx::query_as::<Sqlite, Note>(&query)
        .bind(slug)
        .bind(author_id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

/// A duplicate slug surfaces as the UNIQUE violation inside
/// `RequestError::DatabaseError`; the handler maps it to the form error.
pub async fn insert_note_in_db(
    pool: &SqlitePool,
    author_id: i64,
    title: &str,
    text: &str,
    slug: &str,
) -> Result<Note, RequestError> {
    let (id,) = sqlx::query_as::<Sqlite, (i64,)>(
        r#"
        INSERT INTO notes (title, text, slug, author_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(text)
    .bind(slug)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    get_note_by_id_in_db(pool, id)
        .await?
        .ok_or(RequestError::ServerError)
}

pub async fn update_note_in_db(
    pool: &SqlitePool,
    author_id: i64,
    old_slug: &str,
    title: &str,
    text: &str,
    new_slug: &str,
) -> Result<Note, RequestError> {
    let result =
        sqlx::query("UPDATE notes SET title = $1, text = $2, slug = $3 WHERE slug = $4 AND author_id = $5")
            .bind(title)
            .bind(text)
            .bind(new_slug)
            .bind(old_slug)
            .bind(author_id)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }
    get_note_by_slug_in_db(pool, author_id, new_slug)
        .await?
        .ok_or(RequestError::ServerError)
}

pub async fn delete_note_in_db(
    pool: &SqlitePool,
    author_id: i64,
    slug: &str,
) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM notes WHERE slug = $1 AND author_id = $2")
        .bind(slug)
        .bind(author_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }
    Ok(())
}

async fn get_note_by_id_in_db(pool: &SqlitePool, id: i64) -> Result<Option<Note>, RequestError> {
    let query = format!("{NOTE_QUERY} WHERE notes.id = $1");
    let result = sqlx::query_as::<Sqlite, Note>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}
