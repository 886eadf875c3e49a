pub mod accounts;
pub mod auth;
pub mod budget;
pub mod clubs;
pub mod dashboard;
pub mod event;
pub mod member;
pub mod prize;
pub mod report;

pub mod health {
    use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
    use crate::state::AppState;
    use crate::domain::models::club::CLUB_COUNTER;
    use std::sync::Arc;
    use tracing::warn;

    /// Liveness plus a cheap storage probe.
    pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
        match state.counter_repo.current_value(CLUB_COUNTER).await {
            Ok(_) => (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))),
            Err(e) => {
                warn!("Health probe failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({"status": "degraded"})))
            }
        }
    }
}
