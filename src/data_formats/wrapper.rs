use serde::{Deserialize, Serialize};

use super::response::{CommentForm, CommentResponse, NewsResponse, NoteForm, NoteResponse};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper<T> {
    pub user: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper<T> {
    pub comment: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NoteWrapper<T> {
    pub note: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FormWrapper<T> {
    pub form: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleNewsWrapper {
    pub news: Vec<NewsResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleNotesWrapper {
    pub notes: Vec<NoteResponse>,
}

/// Edit pages carry the resource next to its pre-filled form.
#[derive(Debug, Deserialize, Serialize)]
pub struct CommentEditPage {
    pub comment: CommentResponse,
    pub form: CommentForm,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NoteEditPage {
    pub note: NoteResponse,
    pub form: NoteForm,
}
