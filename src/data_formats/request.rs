use serde::{Deserialize, Serialize};

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct CommentRequest {
    pub text: String,
}

// ----------------- Note Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct NoteRequest {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}
