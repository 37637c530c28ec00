mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use minishort::routes::router;
use minishort::state::AppState;
use minishort::web::middleware::session;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

async fn stored_short_ids(pool: &SqlitePool, username: &str) -> Vec<String> {
    sqlx::query_scalar("SELECT short_id FROM urls WHERE username = ? ORDER BY id")
        .bind(username)
        .fetch_all(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_shorten_success(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    let server = common::create_test_server(common::create_test_state(pool.clone()));
    let cookie = common::login(&server, "alice", "pw1").await;

    let response = server
        .post("/shorten")
        .add_header("Cookie", cookie)
        .form(&[("url", "https://example.com")])
        .await;

    response.assert_status_ok();

    let ids = stored_short_ids(&pool, "alice").await;
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0].len(), 8);

    let expected = format!("{}/{}", common::TEST_BASE_URL, ids[0]);
    assert!(response.text().contains(&expected));
}

#[sqlx::test]
async fn test_shorten_stores_url_verbatim(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    let server = common::create_test_server(common::create_test_state(pool.clone()));
    let cookie = common::login(&server, "alice", "pw1").await;

    server
        .post("/shorten")
        .add_header("Cookie", cookie)
        .form(&[("url", "not even a url")])
        .await
        .assert_status_ok();

    let stored: String = sqlx::query_scalar("SELECT original_url FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "not even a url");
}

#[sqlx::test]
async fn test_shorten_without_session(pool: SqlitePool) {
    let server = common::create_test_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .form(&[("url", "https://example.com")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_text("You must be logged in to shorten a URL");

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test]
async fn test_shorten_empty_url_is_rejected_before_session_check(pool: SqlitePool) {
    let server = common::create_test_server(common::create_test_state(pool));

    let response = server.post("/shorten").form(&[("url", "")]).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("URL is required");
}

#[sqlx::test]
async fn test_shorten_same_url_twice_gives_distinct_ids(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    let server = common::create_test_server(common::create_test_state(pool.clone()));
    let cookie = common::login(&server, "alice", "pw1").await;

    for _ in 0..2 {
        server
            .post("/shorten")
            .add_header("Cookie", cookie.clone())
            .form(&[("url", "https://example.com")])
            .await
            .assert_status_ok();
    }

    let ids = stored_short_ids(&pool, "alice").await;
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[sqlx::test]
async fn test_shorten_base_url_from_host_header(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    let state = AppState::new(Arc::new(pool.clone()), None);
    let server = common::create_test_server(state);
    let cookie = common::login(&server, "alice", "pw1").await;

    let response = server
        .post("/shorten")
        .add_header("Cookie", cookie.clone())
        .add_header("Host", "s.example.com")
        .form(&[("url", "https://example.com/1")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("http://s.example.com/"));

    let response = server
        .post("/shorten")
        .add_header("Cookie", cookie)
        .add_header("Host", "s.example.com")
        .add_header("X-Forwarded-Proto", "https")
        .form(&[("url", "https://example.com/2")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("https://s.example.com/"));
}

/// Posts a form without a `Host` header; `uri` may be absolute or path-only.
async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, body: &str) -> (StatusCode, Option<String>, String) {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    let response = app
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, set_cookie, String::from_utf8(bytes.to_vec()).unwrap())
}

#[sqlx::test]
async fn test_shorten_without_host_header(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    let state = AppState::new(Arc::new(pool.clone()), None);
    let app = router(state, session::layer(false, None), "static");

    let (status, cookie, _) = post_form(&app, "/login", None, "username=alice&password=pw1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let cookie = cookie.unwrap();

    let (status, _, body) = post_form(
        &app,
        "/shorten",
        Some(&cookie),
        "url=https%3A%2F%2Fexample.com",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ids = stored_short_ids(&pool, "alice").await;
    assert_eq!(ids.len(), 1);
    assert!(body.contains(&format!(r#"href="/{}""#, ids[0])));

    // An absolute request target (HTTP/2 `:authority`) supplies the host.
    let (status, _, body) = post_form(
        &app,
        "https://s.example.com/shorten",
        Some(&cookie),
        "url=https%3A%2F%2Fexample.com%2F2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ids = stored_short_ids(&pool, "alice").await;
    assert_eq!(ids.len(), 2);
    assert!(body.contains(&format!("https://s.example.com/{}", ids[1])));
}
