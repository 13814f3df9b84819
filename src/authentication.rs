use crate::errors::RequestError;
use anyhow::{Context, Result};
use argon2::PasswordVerifier;
use argon2::{password_hash::SaltString, Argon2, PasswordHash};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const JWT_EXPIRY_DURATION: time::Duration = time::Duration::days(90);

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaim {
    id: i64,
    exp: i64,
}

pub struct AuthUser {
    pub id: i64,
    pub token: String,
}

/// Extractor for pages that render differently for logged-in users but stay
/// reachable anonymously (the news detail page's comment form).
pub struct MaybeUser(pub Option<AuthUser>);

/// Extractor for auth-required pages. A request with no credentials at all
/// is bounced to the login page with the original path as `next`; a request
/// with a malformed or invalid token is rejected outright.
pub struct RequireUser(pub AuthUser);

fn auth_user_from_parts(parts: &Parts) -> Result<Option<AuthUser>, RequestError> {
    let header = match parts.headers.get("Authorization") {
        Some(header) => header,
        None => return Ok(None),
    };
    let header = header
        .to_str()
        .map_err(|_| RequestError::NotAuthorized("Invalid token"))?;
    let token = header
        .strip_prefix("Token ")
        .ok_or(RequestError::NotAuthorized("Invalid token"))?;
    let id = verify_jwt_token(token)?;
    Ok(Some(AuthUser {
        id,
        token: token.to_string(),
    }))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(MaybeUser(auth_user_from_parts(parts)?))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match auth_user_from_parts(parts)? {
            Some(user) => Ok(RequireUser(user)),
            None => Err(RequestError::LoginRequired(parts.uri.path().to_string())),
        }
    }
}

pub fn get_jwt_token(id: i64) -> Result<String> {
    let jwt_secret = std::env::var("JWT_SECRET").context("Failed to get JWT_SECRET")?;
    let expiry_date = OffsetDateTime::now_utc() + JWT_EXPIRY_DURATION;
    let claim = AuthClaim {
        id,
        exp: expiry_date.unix_timestamp(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .context("Failed to generate jwt token")
}

pub fn verify_jwt_token(token: &str) -> Result<i64, RequestError> {
    let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| RequestError::ServerError)?;
    let token_data = jsonwebtoken::decode::<AuthClaim>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_ref()),
        &jsonwebtoken::Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Error verifying token: {}", e);
        RequestError::NotAuthorized("Invalid Token")
    })?;
    let claim = token_data.claims;
    if claim.exp < OffsetDateTime::now_utc().unix_timestamp() {
        return Err(RequestError::NotAuthorized("Token expired"));
    }
    Ok(claim.id)
}

pub async fn verify_password_argon2(password: String, hash: &str) -> Result<bool> {
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let hash = PasswordHash::new(hash.as_str())
            .map_err(|_| anyhow::anyhow!("Failed to verify password"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    })
    .await
    .context("Failed to verify password")?
}

pub async fn hash_password_argon2(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = PasswordHash::generate(Argon2::default(), password, salt.as_salt())
            .map_err(|_| anyhow::anyhow!("Failed to hash password"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Failed to hash password")?
}
