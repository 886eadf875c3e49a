use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AuthUser, ManagerUser};
use crate::api::dtos::{requests::ListQuery, responses::DELETED};
use crate::domain::models::budget::{
    Budget, BudgetAllocation, BudgetAllocationPatch, BudgetPatch, NewBudget,
    NewBudgetAllocation, ALLOCATION_COUNTER, BUDGET_COUNTER,
};
use crate::domain::services::{integrity::ParentRef, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

// Budget lines (income / expenditure)

pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewBudget = schema::BUDGET.parse_create(payload)?;
    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;

    let id = state.counter_repo.next_value(BUDGET_COUNTER).await?;
    let created = state.budget_repo.create(&Budget::new(id, input)).await?;

    info!("Budget line {} recorded for club {} by {}", created.id, created.club, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.budget_repo.list(query.club).await?))
}

pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let budget = state.budget_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Budget {} not found", id)))?;
    Ok(Json(budget))
}

pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut budget = state.budget_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Budget {} not found", id)))?;

    let patch: BudgetPatch = schema::BUDGET.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != budget.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }

    budget.apply(patch);
    let updated = state.budget_repo.update(&budget).await?;

    info!("Budget line {} updated by {}", id, manager.user_id);
    Ok(Json(updated))
}

pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.budget_repo.delete(id).await?;
    info!("Budget line {} deleted by {}", id, manager.user_id);
    Ok(Json(DELETED))
}

// Allocations granted to a club

pub async fn create_allocation(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewBudgetAllocation = schema::BUDGET_ALLOCATION.parse_create(payload)?;
    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;

    let id = state.counter_repo.next_value(ALLOCATION_COUNTER).await?;
    let created = state.allocation_repo.create(&BudgetAllocation::new(id, input)).await?;

    info!("Allocated {} to club {} ({}), by {}", created.so_tien, created.club, created.id, manager.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_allocations(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.allocation_repo.list(query.club).await?))
}

pub async fn get_allocation(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let allocation = state.allocation_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Budget allocation {} not found", id)))?;
    Ok(Json(allocation))
}

pub async fn update_allocation(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut allocation = state.allocation_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound(format!("Budget allocation {} not found", id)))?;

    let patch: BudgetAllocationPatch = schema::BUDGET_ALLOCATION.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != allocation.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }

    allocation.apply(patch);
    let updated = state.allocation_repo.update(&allocation).await?;

    info!("Budget allocation {} updated by {}", id, manager.user_id);
    Ok(Json(updated))
}

pub async fn delete_allocation(
    State(state): State<Arc<AppState>>,
    ManagerUser(manager): ManagerUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.allocation_repo.delete(id).await?;
    info!("Budget allocation {} deleted by {}", id, manager.user_id);
    Ok(Json(DELETED))
}
