use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::responses::DELETED;
use crate::domain::models::club::{Club, ClubPatch, NewClub, CLUB_COUNTER};
use crate::domain::services::{finance, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn create_club(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewClub = schema::CLUB.parse_create(payload)?;

    let club_id = state.counter_repo.next_value(CLUB_COUNTER).await?;
    let created = state.club_repo.create(&Club::new(club_id, input)).await?;

    info!("Club {} created by {}", created.club_id, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_clubs(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let clubs = state.club_repo.list().await?;
    Ok(Json(clubs))
}

pub async fn get_club(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let club = state.club_repo.find_by_id(club_id).await?
        .ok_or(AppError::NotFound(format!("Club {} not found", club_id)))?;
    Ok(Json(club))
}

pub async fn update_club(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(club_id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut club = state.club_repo.find_by_id(club_id).await?
        .ok_or(AppError::NotFound(format!("Club {} not found", club_id)))?;

    let patch: ClubPatch = schema::CLUB.parse_update(payload)?;
    club.apply(patch);

    let updated = state.club_repo.update(&club).await?;
    info!("Club {} updated by {}", club_id, manager.user_id);
    Ok(Json(updated))
}

/// Children are left in place with a dangling `club` reference.
pub async fn delete_club(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.club_repo.delete(club_id).await?;
    info!("Club {} deleted by {}", club_id, manager.user_id);
    Ok(Json(DELETED))
}

pub async fn get_club_finance(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(club_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.club_repo.find_by_id(club_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Club {} not found", club_id)));
    }

    let summary = finance::club_finance(
        club_id,
        state.budget_repo.as_ref(),
        state.allocation_repo.as_ref(),
    ).await?;
    Ok(Json(summary))
}
