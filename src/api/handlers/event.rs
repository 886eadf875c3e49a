use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::{requests::ListQuery, responses::DELETED};
use crate::domain::models::event::{Event, EventPatch, NewEvent, EVENT_COUNTER};
use crate::domain::services::{integrity::ParentRef, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewEvent = schema::EVENT.parse_create(payload)?;
    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;

    let id = state.counter_repo.next_value(EVENT_COUNTER).await?;
    let created = state.event_repo.create(&Event::new(id, input)).await?;

    info!("Event {} scheduled for club {} by {}", created.id, created.club, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list(query.club).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Event {} not found", id)))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Event {} not found", id)))?;

    let patch: EventPatch = schema::EVENT.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != event.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }

    event.apply(patch);
    let updated = state.event_repo.update(&event).await?;

    info!("Event {} updated by {}", id, manager.user_id);
    Ok(Json(updated))
}

/// Reports that listed this event keep the id.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(id).await?;
    info!("Event {} deleted by {}", id, manager.user_id);
    Ok(Json(DELETED))
}
