mod authentication;
mod data_formats;
pub mod db_helpers;
mod errors;
mod handlers;
mod models;
mod validation;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use data_formats::*;
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};

pub use validation::{BAD_WORDS, BAD_WORDS_WARNING, DUPLICATE_SLUG_WARNING};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, address: SocketAddr) -> Result<()> {
    let db = init_db().await?;
    run_app_with_db(app, address, db).await
}

/// Serves `app` against an already prepared pool. The binary goes through
/// [`run_app`]; tests hand in their own in-memory database.
pub async fn run_app_with_db(app: Router, address: SocketAddr, db: SqlitePool) -> Result<()> {
    let app = app.layer(Extension(Arc::new(db)));
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db() -> Result<SqlitePool> {
    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
        tracing::info!("Creating database {}", db_url);
        Sqlite::create_database(&db_url)
            .await
            .context("Failed to create database")?;
    }
    let pool = SqlitePool::connect(&db_url).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/", get(home_page))
        .route("/news/:id", get(news_detail).post(post_comment))
        .route("/edit_comment/:id", get(edit_comment_page).post(edit_comment))
        .route("/delete_comment/:id", post(delete_comment))
        .route("/notes", get(notes_list))
        .route("/add", get(add_note_page).post(add_note))
        .route("/note/:slug", get(note_detail))
        .route("/edit/:slug", get(edit_note_page).post(edit_note))
        .route("/delete/:slug", post(delete_note))
        .route("/done", get(note_done))
        .route("/auth/signup", get(signup_page).post(signup_user))
        .route("/auth/login", get(login_page).post(login_user))
        .route("/auth/logout", get(logout_user))
        .fallback(not_found)
}

/// Turns a note title into a URL-safe slug: Cyrillic transliterated to
/// Latin, lowercased, anything else collapsed into single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            'а' => slug.push('a'),
            'б' => slug.push('b'),
            'в' => slug.push('v'),
            'г' => slug.push('g'),
            'д' => slug.push('d'),
            'е' | 'ё' | 'э' => slug.push('e'),
            'ж' => slug.push_str("zh"),
            'з' => slug.push('z'),
            'и' => slug.push('i'),
            'й' => slug.push('j'),
            'к' => slug.push('k'),
            'л' => slug.push('l'),
            'м' => slug.push('m'),
            'н' => slug.push('n'),
            'о' => slug.push('o'),
            'п' => slug.push('p'),
            'р' => slug.push('r'),
            'с' => slug.push('s'),
            'т' => slug.push('t'),
            'у' => slug.push('u'),
            'ф' => slug.push('f'),
            'х' => slug.push('h'),
            'ц' => slug.push('c'),
            'ч' => slug.push_str("ch"),
            'ш' => slug.push_str("sh"),
            'щ' => slug.push_str("sch"),
            'ъ' | 'ь' => {}
            'ы' => slug.push('y'),
            'ю' => slug.push_str("yu"),
            'я' => slug.push_str("ya"),
            _ => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_transliterates_cyrillic() {
        assert_eq!(slugify("Заметка без slug"), "zametka-bez-slug");
    }

    #[test]
    fn slugify_collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("  Hello,  world!  "), "hello-world");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Новость 42"), "novost-42");
    }
}
