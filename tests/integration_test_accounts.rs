mod common;

use axum::http::StatusCode;
use club_registry::domain::models::account::ROLE_MANAGER;
use common::{TestApp, PASSWORD};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_managers_list_accounts_and_owners_read_their_own() {
    let app = TestApp::new().await;
    let manager = app.manager().await;
    app.register("hs001", "student", None).await;
    app.register("hs002", "student", None).await;
    let student = app.login("hs001", PASSWORD).await;

    let (status, accounts) = app.send("GET", "/api/v1/accounts", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = accounts.as_array().unwrap().iter().map(|a| a["userId"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&"hs002"));
    assert!(accounts[0].get("passwordHash").is_none());

    let (status, _) = app.send("GET", "/api/v1/accounts", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, own) = app.send("GET", "/api/v1/accounts/hs001", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["email"], "hs001@school.edu.vn");

    let (status, _) = app.send("GET", "/api/v1/accounts/hs002", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send("GET", "/api/v1/accounts/hs002", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send("GET", "/api/v1/accounts/ghost", Some(&manager), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rechecks_email_and_guards_roles() {
    let app = TestApp::new().await;
    let manager = app.manager().await;
    app.register("hs001", "student", None).await;
    app.register("hs002", "student", None).await;
    let student = app.login("hs001", PASSWORD).await;

    let (status, updated) = app.send("PUT", "/api/v1/accounts/hs001", Some(&student), Some(json!({
        "ten": "Nguyễn Văn An"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ten"], "Nguyễn Văn An");
    assert_eq!(updated["role"], "student");

    let (status, body) = app.send("PUT", "/api/v1/accounts/hs001", Some(&student), Some(json!({
        "email": "HS002@school.edu.vn"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    // Re-sending one's own address is not a conflict.
    let (status, _) = app.send("PUT", "/api/v1/accounts/hs001", Some(&student), Some(json!({
        "email": "hs001@school.edu.vn"
    }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("PUT", "/api/v1/accounts/hs002", Some(&student), Some(json!({"ten": "X"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("PUT", "/api/v1/accounts/hs001", Some(&student), Some(json!({"role": "manager"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("PUT", "/api/v1/accounts/gv001", Some(&manager), Some(json!({"role": "student"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, promoted) = app.send("PUT", "/api/v1/accounts/hs001", Some(&manager), Some(json!({"role": "manager"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promoted["role"], "manager");

    let (status, body) = app.send("PUT", "/api/v1/accounts/hs001", Some(&manager), Some(json!({"email": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["problem"], "cannot be cleared");

    let (status, _) = app.send("PUT", "/api/v1/accounts/ghost", Some(&manager), Some(json!({"ten": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_change_ends_existing_sessions() {
    let app = TestApp::new().await;
    app.manager().await;
    app.register("hs001", "student", None).await;
    let phone = app.login("hs001", PASSWORD).await;
    let laptop = app.login("hs001", PASSWORD).await;

    let (status, _) = app.send("PUT", "/api/v1/accounts/hs001", Some(&laptop), Some(json!({
        "password": "a-brand-new-secret"
    }))).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.refresh(&phone.refresh_token).await, StatusCode::UNAUTHORIZED);
    assert_eq!(app.refresh(&laptop.refresh_token).await, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("POST", "/api/v1/auth/login", None, Some(json!({
        "userId": "hs001", "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let fresh = app.login("hs001", "a-brand-new-secret").await;
    assert_eq!(app.refresh(&fresh.refresh_token).await, StatusCode::OK);
}

#[tokio::test]
async fn test_renaming_keeps_sessions_alive() {
    let app = TestApp::new().await;
    app.manager().await;
    app.register("hs001", "student", None).await;
    let session = app.login("hs001", PASSWORD).await;

    let (status, _) = app.send("PUT", "/api/v1/accounts/hs001", Some(&session), Some(json!({"ten": "An"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.refresh(&session.refresh_token).await, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_account_revokes_its_sessions() {
    let app = TestApp::new().await;
    let manager = app.manager().await;
    app.register("hs001", "student", None).await;
    let student = app.login("hs001", PASSWORD).await;

    let (status, body) = app.send("DELETE", "/api/v1/accounts/hs001", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    assert_eq!(app.refresh(&student.refresh_token).await, StatusCode::UNAUTHORIZED);
    let (status, _) = app.send("GET", "/api/v1/accounts/hs001", Some(&manager), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The id can be registered again afterwards.
    assert_eq!(app.register("hs001", "student", None).await, StatusCode::CREATED);

    let (status, _) = app.send("DELETE", "/api/v1/accounts/gv001", Some(&manager), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = app.send("DELETE", "/api/v1/accounts/ghost", Some(&manager), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_manager_registrations_admit_one() {
    let app = Arc::new(TestApp::new().await);

    let mut set = JoinSet::new();
    for i in 0..6 {
        let app = app.clone();
        set.spawn(async move { app.register(&format!("gv10{}", i), "manager", None).await });
    }

    let mut statuses = Vec::new();
    while let Some(res) = set.join_next().await {
        statuses.push(res.unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    assert_eq!(created, 1, "statuses: {:?}", statuses);
    assert!(statuses.iter().all(|s| *s == StatusCode::CREATED || *s == StatusCode::FORBIDDEN));
    assert_eq!(app.state.account_repo.count_by_role(ROLE_MANAGER).await.unwrap(), 1);
}
