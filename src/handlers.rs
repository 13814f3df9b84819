use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    authentication::{
        get_jwt_token, hash_password_argon2, verify_password_argon2, MaybeUser, RequireUser,
    },
    db_helpers::{
        add_comment_to_news_in_db, delete_comment_in_db, delete_note_in_db,
        get_comment_for_author_in_db, get_comments_for_news_in_db, get_news_by_id_in_db,
        get_note_by_slug_in_db, get_user_by_username, insert_note_in_db, insert_user,
        list_news_in_db, list_notes_for_author_in_db, update_comment_in_db, update_note_in_db,
    },
    errors::RequestError,
    validation::{check_comment_text, clean_slug, duplicate_slug_error},
    AuthForm, CommentEditPage, CommentForm, CommentRequest, CommentResponse, CommentWrapper,
    FormWrapper, LoginRequest, MultipleNewsWrapper, MultipleNotesWrapper, NewsDetailResponse,
    NewsResponse, NoteEditPage, NoteForm, NoteRequest, NoteResponse, NoteWrapper, PageQueryParams,
    SignupRequest, UserResponse, UserWrapper,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

// ----------------- User Handlers -----------------
pub async fn signup_page() -> Json<FormWrapper<AuthForm>> {
    Json(FormWrapper {
        form: AuthForm::default(),
    })
}

pub async fn signup_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(UserWrapper { user: request }): Json<UserWrapper<SignupRequest>>,
) -> JsonResult<UserWrapper<UserResponse>> {
    let password_hash = hash_password_argon2(request.password)
        .await
        .map_err(|_| RequestError::RunTimeError("Could not register user\nPlease Try again"))?;

    let user_id = insert_user(&pool, &request.username, &password_hash)
        .await
        .map_err(|e| {
            if let RequestError::DatabaseError(sqlx::Error::Database(e)) = &e {
                if e.message().contains("UNIQUE constraint failed") {
                    return RequestError::RunTimeError("Username already exists");
                }
            }
            e
        })?;

    let token = get_jwt_token(user_id).map_err(|_| RequestError::ServerError)?;
    let result = UserResponse {
        username: request.username,
        token,
    };
    Ok(Json(UserWrapper { user: result }))
}

pub async fn login_page() -> Json<FormWrapper<AuthForm>> {
    Json(FormWrapper {
        form: AuthForm::default(),
    })
}

pub async fn login_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(UserWrapper { user: request }): Json<UserWrapper<LoginRequest>>,
) -> JsonResult<UserWrapper<UserResponse>> {
    let user = get_user_by_username(&pool, &request.username)
        .await?
        .ok_or(RequestError::RunTimeError("Username not found"))?;

    let is_password_correct = verify_password_argon2(request.password, &user.password)
        .await
        .map_err(|_| RequestError::RunTimeError("Could not login user\nPlease Try again"))?;
    if !is_password_correct {
        return Err(RequestError::RunTimeError("Incorrect password"));
    }

    let token = get_jwt_token(user.id).map_err(|_| RequestError::ServerError)?;
    let result = UserResponse {
        username: user.username,
        token,
    };
    Ok(Json(UserWrapper { user: result }))
}

// Tokens are stateless; the page only has to exist and answer 200.
pub async fn logout_user() -> StatusCode {
    StatusCode::OK
}

// ----------------- News Handlers -----------------
pub async fn home_page(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<PageQueryParams>,
) -> JsonResult<MultipleNewsWrapper> {
    let news = list_news_in_db(&pool, params.page).await?;
    Ok(Json(MultipleNewsWrapper {
        news: news.into_iter().map(NewsResponse::new).collect(),
    }))
}

pub async fn news_detail(
    Extension(pool): Extension<Arc<SqlitePool>>,
    MaybeUser(maybe_user): MaybeUser,
    Path(id): Path<i64>,
) -> JsonResult<NewsDetailResponse> {
    let news = get_news_by_id_in_db(&pool, id)
        .await?
        .ok_or(RequestError::NotFound)?;
    let comments = get_comments_for_news_in_db(&pool, id).await?;
    Ok(Json(NewsDetailResponse {
        news: NewsResponse::new(news),
        comments: comments.into_iter().map(CommentResponse::new).collect(),
        form: maybe_user.map(|_| CommentForm::default()),
    }))
}

// ----------------- Comment Handlers -----------------
pub async fn post_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Json(CommentWrapper { comment }): Json<CommentWrapper<CommentRequest>>,
) -> JsonResult<CommentWrapper<CommentResponse>> {
    check_comment_text(&comment.text)?;
    let comment = add_comment_to_news_in_db(&pool, user.id, id, &comment.text).await?;
    Ok(Json(CommentWrapper {
        comment: CommentResponse::new(comment),
    }))
}

pub async fn edit_comment_page(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> JsonResult<CommentEditPage> {
    let comment = get_comment_for_author_in_db(&pool, user.id, id)
        .await?
        .ok_or(RequestError::NotFound)?;
    Ok(Json(CommentEditPage {
        form: CommentForm::filled(&comment),
        comment: CommentResponse::new(comment),
    }))
}

pub async fn edit_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Json(CommentWrapper { comment }): Json<CommentWrapper<CommentRequest>>,
) -> JsonResult<CommentWrapper<CommentResponse>> {
    get_comment_for_author_in_db(&pool, user.id, id)
        .await?
        .ok_or(RequestError::NotFound)?;
    check_comment_text(&comment.text)?;
    let comment = update_comment_in_db(&pool, user.id, id, &comment.text).await?;
    Ok(Json(CommentWrapper {
        comment: CommentResponse::new(comment),
    }))
}

pub async fn delete_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, RequestError> {
    delete_comment_in_db(&pool, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Note Handlers -----------------
pub async fn notes_list(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
) -> JsonResult<MultipleNotesWrapper> {
    let notes = list_notes_for_author_in_db(&pool, user.id).await?;
    Ok(Json(MultipleNotesWrapper {
        notes: notes.into_iter().map(NoteResponse::new).collect(),
    }))
}

pub async fn add_note_page(RequireUser(_user): RequireUser) -> Json<FormWrapper<NoteForm>> {
    Json(FormWrapper {
        form: NoteForm::default(),
    })
}

pub async fn add_note(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Json(NoteWrapper { note }): Json<NoteWrapper<NoteRequest>>,
) -> JsonResult<NoteWrapper<NoteResponse>> {
    let slug = clean_slug(note.slug.as_deref(), &note.title);
    let note = insert_note_in_db(&pool, user.id, &note.title, &note.text, &slug)
        .await
        .map_err(|e| {
            if let RequestError::DatabaseError(sqlx::Error::Database(e)) = &e {
                if e.message().contains("UNIQUE constraint failed") {
                    return duplicate_slug_error(&slug);
                }
            }
            e
        })?;
    Ok(Json(NoteWrapper {
        note: NoteResponse::new(note),
    }))
}

pub async fn note_detail(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
) -> JsonResult<NoteWrapper<NoteResponse>> {
    let note = get_note_by_slug_in_db(&pool, user.id, &slug)
        .await?
        .ok_or(RequestError::NotFound)?;
    Ok(Json(NoteWrapper {
        note: NoteResponse::new(note),
    }))
}

pub async fn edit_note_page(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
) -> JsonResult<NoteEditPage> {
    let note = get_note_by_slug_in_db(&pool, user.id, &slug)
        .await?
        .ok_or(RequestError::NotFound)?;
    Ok(Json(NoteEditPage {
        form: NoteForm::filled(&note),
        note: NoteResponse::new(note),
    }))
}

pub async fn edit_note(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
    Json(NoteWrapper { note }): Json<NoteWrapper<NoteRequest>>,
) -> JsonResult<NoteWrapper<NoteResponse>> {
    get_note_by_slug_in_db(&pool, user.id, &slug)
        .await?
        .ok_or(RequestError::NotFound)?;
    let new_slug = clean_slug(note.slug.as_deref(), &note.title);
    let note = update_note_in_db(&pool, user.id, &slug, &note.title, &note.text, &new_slug)
        .await
        .map_err(|e| {
            if let RequestError::DatabaseError(sqlx::Error::Database(e)) = &e {
                if e.message().contains("UNIQUE constraint failed") {
                    return duplicate_slug_error(&new_slug);
                }
            }
            e
        })?;
    Ok(Json(NoteWrapper {
        note: NoteResponse::new(note),
    }))
}

pub async fn delete_note(
    Extension(pool): Extension<Arc<SqlitePool>>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, RequestError> {
    delete_note_in_db(&pool, user.id, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn note_done(RequireUser(_user): RequireUser) -> &'static str {
    "done"
}
