use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::{requests::ListQuery, responses::DELETED};
use crate::domain::models::prize::{NewPrize, Prize, PrizePatch, PRIZE_COUNTER};
use crate::domain::services::{integrity::ParentRef, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn create_prize(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewPrize = schema::PRIZE.parse_create(payload)?;
    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;
    state.integrity.assert_parent_exists(&ParentRef::Member(input.thanh_vien.clone())).await?;

    let id = state.counter_repo.next_value(PRIZE_COUNTER).await?;
    let created = state.prize_repo.create(&Prize::new(id, input)).await?;

    info!("Prize {} awarded to {} in club {} by {}", created.id, created.thanh_vien, created.club, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_prizes(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.prize_repo.list(query.club).await?))
}

pub async fn get_prize(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let prize = state.prize_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Prize {} not found", id)))?;
    Ok(Json(prize))
}

pub async fn update_prize(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut prize = state.prize_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Prize {} not found", id)))?;

    let patch: PrizePatch = schema::PRIZE.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != prize.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }
    if let Some(member) = patch.thanh_vien.as_ref().filter(|m| **m != prize.thanh_vien) {
        state.integrity.assert_parent_exists(&ParentRef::Member(member.clone())).await?;
    }

    prize.apply(patch);
    let updated = state.prize_repo.update(&prize).await?;

    info!("Prize {} updated by {}", id, manager.user_id);
    Ok(Json(updated))
}

pub async fn delete_prize(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.prize_repo.delete(id).await?;
    info!("Prize {} deleted by {}", id, manager.user_id);
    Ok(Json(DELETED))
}
