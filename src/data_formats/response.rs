use serde::{Deserialize, Serialize};

use crate::models::{Comment, News, Note};

#[derive(Deserialize, Serialize, Debug)]
pub struct UserResponse {
    pub username: String,
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct NewsResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub author: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: String,
}

/// The news detail page: the item, its comments oldest-first, and a comment
/// form only when the requester is logged in.
#[derive(Deserialize, Serialize, Debug)]
pub struct NewsDetailResponse {
    pub news: NewsResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentForm>,
}

// Empty or pre-filled form objects, standing in for the form the original
// pages render.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CommentForm {
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
}

impl NewsResponse {
    pub fn new(News { id, title, text, date }: News) -> Self {
        NewsResponse {
            id,
            title,
            text,
            date: date.to_string(),
        }
    }
}

impl CommentResponse {
    pub fn new(
        Comment {
            id,
            text,
            created_at,
            author_username,
            ..
        }: Comment,
    ) -> Self {
        CommentResponse {
            id,
            text,
            created_at: created_at.to_string(),
            author: author_username,
        }
    }
}

impl NoteResponse {
    pub fn new(
        Note {
            id,
            title,
            text,
            slug,
            author_username,
            ..
        }: Note,
    ) -> Self {
        NoteResponse {
            id,
            title,
            text,
            slug,
            author: author_username,
        }
    }
}

impl CommentForm {
    pub fn filled(comment: &Comment) -> Self {
        CommentForm {
            text: comment.text.clone(),
        }
    }
}

impl NoteForm {
    pub fn filled(note: &Note) -> Self {
        NoteForm {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
        }
    }
}
