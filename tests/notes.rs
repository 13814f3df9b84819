use reqwest::StatusCode;

mod common;
use common::{spawn_app, token_header};
use common::TestApp;

async fn create_note(
    app: &TestApp,
    token: &str,
    title: &str,
    text: &str,
    slug: Option<&str>,
) -> reqwest::Response {
    app.post("/add")
        .header("Authorization", token_header(token))
        .json(&serde_json::json!({
            "note": {"title": title, "text": text, "slug": slug}
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn notes_list_shows_only_the_users_own_notes() {
    let app = spawn_app().await;
    let author_token = app.signup("author", "password").await;
    let reader_token = app.signup("reader", "password").await;
    create_note(&app, &author_token, "Заголовок", "Текст", Some("my-note")).await;

    let response = app
        .get("/notes")
        .header("Authorization", token_header(&reader_token))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["notes"].as_array().unwrap().is_empty());

    let response = app
        .get("/notes")
        .header("Authorization", token_header(&author_token))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["slug"], "my-note");
}

#[tokio::test]
async fn add_and_edit_pages_contain_a_form() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;
    create_note(&app, &token, "Заголовок", "Текст", Some("my-note")).await;

    let response = app
        .get("/add")
        .header("Authorization", token_header(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["form"]["title"], "");

    let response = app
        .get("/edit/my-note")
        .header("Authorization", token_header(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["form"]["title"], "Заголовок");
}

#[tokio::test]
async fn note_pages_redirect_anonymous_users_to_login() {
    let app = spawn_app().await;

    for path in ["/notes", "/add", "/done"] {
        let response = app.get(path).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers()["location"].to_str().unwrap();
        assert_eq!(location, format!("/auth/login?next={}", path));
    }
}

#[tokio::test]
async fn note_pages_are_available_to_logged_in_users() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;

    for path in ["/notes", "/add", "/done"] {
        let response = app
            .get(path)
            .header("Authorization", token_header(&token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn note_detail_and_edit_are_author_only() {
    let app = spawn_app().await;
    let author_token = app.signup("author", "password").await;
    let reader_token = app.signup("reader", "password").await;
    create_note(&app, &author_token, "Заголовок", "Текст", Some("my-note")).await;

    for path in ["/note/my-note", "/edit/my-note"] {
        let response = app
            .get(path)
            .header("Authorization", token_header(&author_token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .get(path)
            .header("Authorization", token_header(&reader_token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn user_can_create_note() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;

    let response = create_note(
        &app,
        &token,
        "Заметка пользователя",
        "Содержимое заметки",
        Some("my-note"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["note"]["title"], "Заметка пользователя");
    assert_eq!(body["note"]["author"], "author");
    assert_eq!(app.note_count().await, 1);
}

#[tokio::test]
async fn anonymous_user_cannot_create_note() {
    let app = spawn_app().await;

    let response = app
        .post("/add")
        .json(&serde_json::json!({
            "note": {"title": "Заметка", "text": "Текст", "slug": "my-note"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;
    create_note(&app, &token, "Первая заметка", "Текст", Some("my-note")).await;

    let response = create_note(&app, &token, "Вторая заметка", "Текст", Some("my-note")).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["slug"][0],
        format!("my-note{}", bulletin::DUPLICATE_SLUG_WARNING)
    );
    assert_eq!(app.note_count().await, 1);
}

#[tokio::test]
async fn slug_is_generated_from_title_when_omitted() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;

    let response = create_note(&app, &token, "Заметка без slug", "Текст", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["note"]["slug"], bulletin::slugify("Заметка без slug"));
}

#[tokio::test]
async fn author_can_edit_own_note() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;
    create_note(&app, &token, "Заметка", "Содержимое", Some("my-note")).await;

    let response = app
        .post("/edit/my-note")
        .header("Authorization", token_header(&token))
        .json(&serde_json::json!({
            "note": {
                "title": "Отредактированная заметка",
                "text": "Новое содержимое",
                "slug": "my-note"
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (title,): (String,) = sqlx::query_as("SELECT title FROM notes WHERE slug = $1")
        .bind("my-note")
        .fetch_one(&app.db)
        .await
        .unwrap();
    assert_eq!(title, "Отредактированная заметка");
}

#[tokio::test]
async fn empty_slug_on_edit_is_regenerated_from_title() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;
    create_note(&app, &token, "Заметка", "Содержимое", Some("my-note")).await;

    let response = app
        .post("/edit/my-note")
        .header("Authorization", token_header(&token))
        .json(&serde_json::json!({
            "note": {"title": "Новый заголовок", "text": "Содержимое", "slug": ""}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["note"]["slug"], bulletin::slugify("Новый заголовок"));
}

#[tokio::test]
async fn user_cannot_edit_another_users_note() {
    let app = spawn_app().await;
    let author_token = app.signup("author", "password").await;
    let reader_token = app.signup("reader", "password").await;
    create_note(&app, &author_token, "Заметка", "Содержимое", Some("my-note")).await;

    let response = app
        .post("/edit/my-note")
        .header("Authorization", token_header(&reader_token))
        .json(&serde_json::json!({
            "note": {"title": "Чужая правка", "text": "Содержимое", "slug": "my-note"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let (title,): (String,) = sqlx::query_as("SELECT title FROM notes WHERE slug = $1")
        .bind("my-note")
        .fetch_one(&app.db)
        .await
        .unwrap();
    assert_eq!(title, "Заметка");
}

#[tokio::test]
async fn author_can_delete_own_note() {
    let app = spawn_app().await;
    let token = app.signup("author", "password").await;
    create_note(&app, &token, "Удаляемая заметка", "Содержимое", Some("my-note")).await;

    let response = app
        .post("/delete/my-note")
        .header("Authorization", token_header(&token))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn user_cannot_delete_another_users_note() {
    let app = spawn_app().await;
    let author_token = app.signup("author", "password").await;
    let reader_token = app.signup("reader", "password").await;
    create_note(&app, &author_token, "Заметка", "Содержимое", Some("my-note")).await;

    let response = app
        .post("/delete/my-note")
        .header("Authorization", token_header(&reader_token))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.note_count().await, 1);
}
