use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::error::AppError;
use std::sync::Arc;

/// Roll-up over the clubs the caller heads.
pub async fn my_dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.dashboard.for_head_manager(&user.user_id, today).await?))
}

pub async fn school_dashboard(
    State(state): State<Arc<AppState>>,
    _manager: ManagerUser,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.dashboard.school_wide(today).await?))
}
