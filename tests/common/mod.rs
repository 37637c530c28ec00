#![allow(dead_code)]

use axum::http::header::SET_COOKIE;
use axum_test::{TestResponse, TestServer};
use minishort::domain::entities::{NewLink, NewUser};
use minishort::domain::repositories::{LinkRepository, UserRepository};
use minishort::infrastructure::persistence::{SqliteLinkRepository, SqliteUserRepository};
use minishort::routes::router;
use minishort::state::AppState;
use minishort::utils::password::hash_password;
use minishort::web::middleware::session;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool), Some(TEST_BASE_URL.to_string()))
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = router(state, session::layer(false, None), "static");
    TestServer::new(app).unwrap()
}

pub async fn create_test_user(pool: &SqlitePool, username: &str, password: &str) {
    SqliteUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
        })
        .await
        .unwrap();
}

/// Inserts a row the way the pre-hashing tool did: cleartext in `password`.
pub async fn create_legacy_user(pool: &SqlitePool, username: &str, password: &str) {
    sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn stored_password(pool: &SqlitePool, username: &str) -> String {
    sqlx::query_scalar("SELECT password FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_link(pool: &SqlitePool, short_id: &str, url: &str, username: &str) {
    SqliteLinkRepository::new(Arc::new(pool.clone()))
        .create(NewLink {
            short_id: short_id.to_string(),
            original_url: url.to_string(),
            username: username.to_string(),
        })
        .await
        .unwrap();
}

/// Extracts `name=value` from the response's `Set-Cookie` header.
pub fn session_cookie(response: &TestResponse) -> String {
    let header = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}

/// Logs in through the form and returns the session cookie.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;

    assert_eq!(response.status_code(), 303);
    session_cookie(&response)
}
