use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

// Comment and Note rows carry the author's username from a join, the
// queries alias it as `author_username`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub author_username: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
    pub author_username: String,
}
