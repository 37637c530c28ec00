mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use minishort::config::Config;
use minishort::routes::app_router;
use sqlx::SqlitePool;
use tower::ServiceExt;

#[sqlx::test]
async fn test_home_anonymous(pool: SqlitePool) {
    let server = common::create_test_server(common::create_test_state(pool));

    let response = server.get("/").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#"href="/login""#));
    assert!(body.contains(r#"href="/register""#));
    assert!(!body.contains(r#"action="/shorten""#));
}

#[sqlx::test]
async fn test_home_lists_only_own_links(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    common::create_test_link(&pool, "aaaa1111", "https://one.example", "alice").await;
    common::create_test_link(&pool, "bbbb2222", "https://two.example", "alice").await;
    common::create_test_link(&pool, "cccc3333", "https://bobs.example", "bob").await;

    let server = common::create_test_server(common::create_test_state(pool));
    let cookie = common::login(&server, "alice", "pw1").await;

    let response = server.get("/").add_header("Cookie", cookie).await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("http://localhost:3000/aaaa1111"));
    assert!(body.contains("https://one.example"));
    assert!(body.contains("http://localhost:3000/bbbb2222"));
    assert!(body.contains("https://two.example"));
    assert!(!body.contains("cccc3333"));
    assert!(!body.contains("https://bobs.example"));
}

#[sqlx::test]
async fn test_home_escapes_stored_urls(pool: SqlitePool) {
    common::create_test_user(&pool, "alice", "pw1").await;
    common::create_test_link(&pool, "aaaa1111", "<script>alert(1)</script>", "alice").await;

    let server = common::create_test_server(common::create_test_state(pool));
    let cookie = common::login(&server, "alice", "pw1").await;

    let body = server.get("/").add_header("Cookie", cookie).await.text();

    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[sqlx::test]
async fn test_static_assets_served(pool: SqlitePool) {
    let server = common::create_test_server(common::create_test_state(pool));

    let response = server.get("/static/style.css").await;

    response.assert_status_ok();
}

#[sqlx::test]
async fn test_trailing_slash_is_normalized(pool: SqlitePool) {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        base_url: Some(common::TEST_BASE_URL.to_string()),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 5,
        session_secure_cookie: false,
        session_idle_minutes: None,
        reset_links_on_startup: false,
        static_dir: "static".to_string(),
    };
    let app = app_router(common::create_test_state(pool), &config);

    let response = app
        .oneshot(Request::builder().uri("/login/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
