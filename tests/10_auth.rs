mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.get("/health", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn login_sets_session_cookie() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.login_as(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.body);
    assert_eq!(res.body, json!({ "ok": true }));

    let cookie = res.set_cookie().expect("Set-Cookie header");
    assert!(cookie.starts_with("token="), "cookie: {}", cookie);
    assert!(cookie.contains("HttpOnly"), "cookie: {}", cookie);
    assert!(cookie.contains("SameSite=Lax"), "cookie: {}", cookie);
    assert!(cookie.contains("Path=/"), "cookie: {}", cookie);
    assert!(cookie.contains("Max-Age=604800"), "cookie: {}", cookie);
    // Development configuration does not mark cookies Secure
    assert!(!cookie.contains("Secure"), "cookie: {}", cookie);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() -> Result<()> {
    let app = common::spawn_app().await?;

    let wrong_password = app.login_as(ADMIN_USERNAME, "not-the-password").await?;
    let unknown_user = app.login_as("nobody", ADMIN_PASSWORD).await?;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body, json!({ "error": "Invalid credentials" }));
    assert!(wrong_password.set_cookie().is_none());
    assert!(unknown_user.set_cookie().is_none());
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_bad_request() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .request(Method::POST, "/api/auth/login", None, Some(json!({ "username": "admin" })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string(), "body: {}", res.body);
    Ok(())
}

#[tokio::test]
async fn me_reports_session_username() -> Result<()> {
    let app = common::spawn_app().await?;
    let cookie = app.admin_cookie().await?;

    let res = app.get("/api/auth/me", Some(&cookie)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "username": ADMIN_USERNAME }));

    let anonymous = app.get("/api/auth/me", None).await?;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body, json!({ "error": "Unauthorized" }));
    Ok(())
}

#[tokio::test]
async fn expired_and_forged_tokens_are_refused() -> Result<()> {
    let app = common::spawn_app().await?;

    let expired = app
        .state
        .tokens
        .issue_at(ADMIN_USERNAME, 1, Utc::now() - Duration::days(8))?;
    let res = app.get("/api/auth/me", Some(&format!("token={}", expired))).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let forger = casa_catalog::auth::TokenAuthority::new("some-other-secret", Duration::days(7))?;
    let forged = forger.issue(ADMIN_USERNAME, 1)?;
    let res = app.get("/api/admin/properties", Some(&format!("token={}", forged))).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie_and_is_idempotent() -> Result<()> {
    let app = common::spawn_app().await?;
    let cookie = app.admin_cookie().await?;

    for attempt in [Some(cookie.as_str()), None] {
        let res = app.request(Method::POST, "/api/auth/logout", attempt, None).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({ "ok": true }));

        let removal = res.header(header::SET_COOKIE).expect("removal cookie");
        assert!(removal.starts_with("token="), "cookie: {}", removal);
        assert!(removal.contains("Max-Age=0"), "cookie: {}", removal);
    }
    Ok(())
}
