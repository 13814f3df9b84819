use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use bulletin::db_helpers::{add_comment_to_news_in_db, get_user_by_username, insert_news_in_db};
use bulletin::{make_router, run_app_with_db};

pub struct TestApp {
    pub address: String,
    pub db: SqlitePool,
    pub client: reqwest::Client,
}

/// Boots the full application on a random free port against a fresh
/// in-memory database and returns a client that does not follow redirects,
/// so login redirects stay observable.
pub async fn spawn_app() -> TestApp {
    std::env::set_var("JWT_SECRET", "test-secret");

    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    let (port, addr) = bulletin::get_random_free_port();
    tokio::spawn(run_app_with_db(make_router(), addr, db.clone()));

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let address = format!("http://127.0.0.1:{}", port);

    for _ in 0..50 {
        if client
            .get(format!("{}/check_health", address))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    TestApp {
        address,
        db,
        client,
    }
}

impl TestApp {
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.address, path))
    }

    /// Registers a user over the API and returns their token.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/signup")
            .json(&serde_json::json!({
                "user": {"username": username, "password": password}
            }))
            .send()
            .await
            .expect("Failed to execute signup request");
        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.unwrap();
        body["user"]["token"].as_str().unwrap().to_string()
    }

    pub async fn user_id(&self, username: &str) -> i64 {
        get_user_by_username(&self.db, username)
            .await
            .unwrap()
            .expect("User not found")
            .id
    }

    pub async fn seed_news(&self, title: &str, date: Option<NaiveDate>) -> i64 {
        insert_news_in_db(&self.db, title, "Some content", date)
            .await
            .unwrap()
            .id
    }

    pub async fn seed_comment(&self, author_id: i64, news_id: i64, text: &str) -> i64 {
        add_comment_to_news_in_db(&self.db, author_id, news_id, text)
            .await
            .unwrap()
            .id
    }

    pub async fn comment_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }

    pub async fn note_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }
}

pub fn token_header(token: &str) -> String {
    format!("Token {}", token)
}
