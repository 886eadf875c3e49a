mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_registration_uniqueness_and_role_gate() {
    let app = TestApp::new().await;

    // Nobody is around yet, so the first manager registers on their own.
    let manager = app.manager().await;

    assert_eq!(app.register("gv001", "student", None).await, StatusCode::CONFLICT);

    let (status, body) = app.send("POST", "/api/v1/accounts", None, Some(json!({
        "userId": "other",
        "ten": "Trùng email",
        "email": "GV001@school.edu.vn",
        "password": PASSWORD,
        "role": "student"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    assert_eq!(app.register("hs001", "manager", None).await, StatusCode::FORBIDDEN);
    assert_eq!(app.register("gv002", "manager", Some(&manager)).await, StatusCode::CREATED);

    let (status, body) = app.send("POST", "/api/v1/accounts", None, Some(json!({
        "userId": "x", "ten": "X", "email": "x@x", "password": PASSWORD, "role": "admin"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "role");
}

#[tokio::test]
async fn test_me_never_exposes_password_hash() {
    let app = TestApp::new().await;
    let auth = app.manager().await;

    let (status, me) = app.send("GET", "/api/v1/accounts/me", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["userId"], "gv001");
    assert_eq!(me["role"], "manager");
    assert!(me.get("passwordHash").is_none());
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_user() {
    let app = TestApp::new().await;
    app.manager().await;

    for (user, password) in [("gv001", "nope"), ("ghost", PASSWORD)] {
        let (status, _) = app.send("POST", "/api/v1/auth/login", None, Some(json!({
            "userId": user, "password": password
        }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_writes_need_matching_csrf_token() {
    let app = TestApp::new().await;
    let auth = app.manager().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/clubs")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", "forged")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(common::club_payload("CLB", "gv001").to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/clubs")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() {
    let app = TestApp::new().await;
    app.manager().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"userId": "gv001", "password": PASSWORD}).to_string())).unwrap()
    ).await.unwrap();
    let refresh = cookie_value(&response, "refresh_token");

    let refresh_request = |token: String| {
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", token))
            .body(Body::empty()).unwrap()
    };

    let rotated = app.router.clone().oneshot(refresh_request(refresh.clone())).await.unwrap();
    assert_eq!(rotated.status(), StatusCode::OK);
    let next = cookie_value(&rotated, "refresh_token");
    assert_ne!(next, refresh);

    let body = axum::body::to_bytes(rotated.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user"]["userId"], "gv001");

    // The old token was consumed by the rotation.
    let replay = app.router.clone().oneshot(refresh_request(refresh)).await.unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    let logout = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/logout")
            .header(header::COOKIE, format!("refresh_token={}", next))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    let after_logout = app.router.clone().oneshot(refresh_request(next)).await.unwrap();
    assert_eq!(after_logout.status(), StatusCode::UNAUTHORIZED);
}

fn cookie_value(response: &axum::response::Response, name: &str) -> String {
    let prefix = format!("{}=", name);
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with(&prefix))
        .and_then(|c| c[prefix.len()..].split(';').next())
        .expect("cookie missing")
        .to_string()
}
