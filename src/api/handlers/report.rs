use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::{requests::ListQuery, responses::DELETED};
use crate::domain::models::report::{NewReport, Report, ReportPatch, REPORT_COUNTER};
use crate::domain::services::{integrity::ParentRef, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewReport = schema::REPORT.parse_create(payload)?;
    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;
    if let Some(events) = input.danh_sach_su_kien.as_ref().filter(|ids| !ids.is_empty()) {
        state.integrity.assert_parent_exists(&ParentRef::Events(events.clone())).await?;
    }

    let id = state.counter_repo.next_value(REPORT_COUNTER).await?;
    let created = state.report_repo.create(&Report::new(id, input)).await?;

    info!("Report {} filed for club {} by {}", created.id, created.club, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.report_repo.list(query.club).await?))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.report_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Report {} not found", id)))?;
    Ok(Json(report))
}

pub async fn update_report(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut report = state.report_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Report {} not found", id)))?;

    let patch: ReportPatch = schema::REPORT.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != report.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }
    // Only a replaced list is checked; ids already on the report may name deleted events.
    if let Some(events) = patch.danh_sach_su_kien.as_ref().filter(|ids| !ids.is_empty()) {
        state.integrity.assert_parent_exists(&ParentRef::Events(events.clone())).await?;
    }

    report.apply(patch);
    let updated = state.report_repo.update(&report).await?;

    info!("Report {} updated by {}", id, manager.user_id);
    Ok(Json(updated))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.report_repo.delete(id).await?;
    info!("Report {} deleted by {}", id, manager.user_id);
    Ok(Json(DELETED))
}
