use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::JsonResponse;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    /// Anonymous request to an auth-required page; carries the path the
    /// user was after so login can send them back (`?next=`).
    LoginRequired(String),
    NotAuthorized(&'static str),
    /// A form field failed validation; surfaced under the field's name in
    /// the error body.
    ValidationFailed {
        field: &'static str,
        message: String,
    },
    RunTimeError(&'static str),
    ServerError,
    DatabaseError(sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct RequestErrorJsonWrapper {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl RequestErrorJsonWrapper {
    pub fn new(error: &str) -> RequestErrorJsonWrapper {
        Self::for_field("body", error.to_string())
    }

    pub fn for_field(field: &'static str, message: String) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            errors: BTreeMap::from([(field, vec![message])]),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        if let RequestError::LoginRequired(next) = &self {
            let location = format!("/auth/login?next={}", next);
            let mut response = Redirect::to(&location).into_response();
            // The original bounces anonymous users with a plain 302.
            *response.status_mut() = StatusCode::FOUND;
            return response;
        }
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJsonWrapper> {
        let (status_code, json) = match self {
            RequestError::NotFound => (
                StatusCode::NOT_FOUND,
                RequestErrorJsonWrapper::new("Not Found"),
            ),
            RequestError::LoginRequired(_) => (
                StatusCode::FOUND,
                RequestErrorJsonWrapper::new("Login required"),
            ),
            RequestError::NotAuthorized(message) => (
                StatusCode::UNAUTHORIZED,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::ValidationFailed { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::for_field(*field, message.clone()),
            ),
            RequestError::RunTimeError(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                RequestErrorJsonWrapper::new("Internal Server Error"),
            ),
            RequestError::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJsonWrapper::new("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
