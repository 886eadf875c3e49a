#![allow(dead_code)]

use club_registry::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::sqlite_repositories,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct-horse-battery";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
    pub refresh_token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub db_url: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_busy_timeout(Duration::from_secs(5)).await
    }

    /// Same as `new`, with a custom SQLite lock wait.
    pub async fn with_busy_timeout(busy_timeout: Duration) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            storage_timeout_secs: 5,
        };

        let state = Arc::new(
            AppState::new(config, sqlite_repositories(pool.clone()))
                .expect("Failed to build test state")
        );
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            db_url,
            state,
        }
    }

    /// Sends one request; an empty body comes back as `Value::Null`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&AuthHeaders>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn register(&self, user_id: &str, role: &str, by: Option<&AuthHeaders>) -> StatusCode {
        let payload = json!({
            "userId": user_id,
            "ten": format!("User {}", user_id),
            "email": format!("{}@school.edu.vn", user_id),
            "password": PASSWORD,
            "role": role,
        });
        let (status, _) = self.send("POST", "/api/v1/accounts", by, Some(payload)).await;
        status
    }

    pub async fn login(&self, user_id: &str, password: &str) -> AuthHeaders {
        let payload = json!({
            "userId": user_id,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token = cookie_value(&cookies, "access_token");
        let refresh_token = cookie_value(&cookies, "refresh_token");

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token,
            refresh_token,
        }
    }

    /// Presents a refresh token; only the status matters to callers.
    pub async fn refresh(&self, refresh_token: &str) -> StatusCode {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/refresh")
                .header(header::COOKIE, format!("refresh_token={}", refresh_token))
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();
        response.status()
    }

    /// First manager account, logged in.
    pub async fn manager(&self) -> AuthHeaders {
        assert_eq!(self.register("gv001", "manager", None).await, StatusCode::CREATED);
        self.login("gv001", PASSWORD).await
    }

    /// Creates a club headed by `head` and returns its minted id.
    pub async fn create_club(&self, auth: &AuthHeaders, ten: &str, head: &str) -> i64 {
        let (status, body) = self.send("POST", "/api/v1/clubs", Some(auth), Some(club_payload(ten, head))).await;
        assert_eq!(status, StatusCode::CREATED, "club create failed: {}", body);
        body["clubId"].as_i64().unwrap()
    }
}

/// Value of the `name` cookie among `Set-Cookie` headers.
pub fn cookie_value(set_cookies: &[String], name: &str) -> String {
    let prefix = format!("{}=", name);
    set_cookies.iter()
        .find(|c| c.starts_with(&prefix))
        .and_then(|c| c[prefix.len()..].split(';').next())
        .unwrap_or_else(|| panic!("No {} cookie returned", name))
        .to_string()
}

pub fn club_payload(ten: &str, head: &str) -> Value {
    json!({
        "ten": ten,
        "linhVucHoatDong": "Công nghệ",
        "ngayThanhLap": "2024-01-10",
        "giaoVienPhuTrach": "Nguyen Van A",
        "truongBanCLB": head,
    })
}

pub fn member_payload(ma_so_hoc_sinh: &str, club: i64) -> Value {
    json!({
        "maSoHocSinh": ma_so_hoc_sinh,
        "hoTen": format!("Hoc sinh {}", ma_so_hoc_sinh),
        "lop": "10A1",
        "club": club,
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
