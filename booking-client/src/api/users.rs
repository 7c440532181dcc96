//! `/users` endpoints

use shared::client::{LoginRequest, TokenResponse};
use shared::models::{User, UserCreate, UserUpdate};

use crate::{ClientError, ClientResult, HttpClient};

/// Exchange credentials for an access token (form-encoded)
pub async fn login<C: HttpClient>(client: &C, credentials: &LoginRequest) -> ClientResult<TokenResponse> {
    let token: TokenResponse = client.post_form("users/login", credentials).await?;
    if token.access_token.is_empty() {
        return Err(ClientError::InvalidResponse("Missing access token".into()));
    }
    Ok(token)
}

pub async fn register<C: HttpClient>(client: &C, user: &UserCreate) -> ClientResult<User> {
    client.post("users/register", user).await
}

pub async fn list<C: HttpClient>(client: &C) -> ClientResult<Vec<User>> {
    client.get("users").await
}

pub async fn get<C: HttpClient>(client: &C, user_id: i64) -> ClientResult<User> {
    client.get(&format!("users/{user_id}")).await
}

pub async fn create<C: HttpClient>(client: &C, user: &UserCreate) -> ClientResult<User> {
    client.post("users", user).await
}

pub async fn update<C: HttpClient>(client: &C, user_id: i64, user: &UserUpdate) -> ClientResult<User> {
    client.put(&format!("users/{user_id}"), user).await
}

pub async fn delete<C: HttpClient>(client: &C, user_id: i64) -> ClientResult<User> {
    client.delete(&format!("users/{user_id}")).await
}
