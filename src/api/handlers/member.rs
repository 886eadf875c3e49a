use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{requests::ListQuery, responses::DELETED};
use crate::domain::models::member::{Member, MemberPatch, NewMember};
use crate::domain::services::{integrity::ParentRef, schema};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewMember = schema::MEMBER.parse_create(payload)?;

    state.integrity.assert_parent_exists(&ParentRef::Club(input.club)).await?;
    if let Err(e) = state.integrity
        .assert_no_cross_club_membership(&input.ma_so_hoc_sinh, input.club)
        .await
    {
        warn!("Rejected enrolment of {} into club {}: {}", input.ma_so_hoc_sinh, input.club, e);
        return Err(e);
    }

    let created = state.member_repo.create(&Member::from(input)).await?;

    info!("Member {} joined club {} (by {})", created.ma_so_hoc_sinh, created.club, user.user_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let members = state.member_repo.list(query.club).await?;
    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(ma_so_hoc_sinh): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_repo.find_by_id(&ma_so_hoc_sinh).await?
        .ok_or(AppError::NotFound(format!("Member {} not found", ma_so_hoc_sinh)))?;
    Ok(Json(member))
}

/// The natural key is fixed; moving to another club only needs that club to exist
/// since the student cannot be enrolled anywhere else.
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(ma_so_hoc_sinh): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut member = state.member_repo.find_by_id(&ma_so_hoc_sinh).await?
        .ok_or(AppError::NotFound(format!("Member {} not found", ma_so_hoc_sinh)))?;

    let patch: MemberPatch = schema::MEMBER.parse_update(payload)?;
    if let Some(club) = patch.club.filter(|c| *c != member.club) {
        state.integrity.assert_parent_exists(&ParentRef::Club(club)).await?;
    }

    member.apply(patch);
    let updated = state.member_repo.update(&member).await?;

    info!("Member {} updated by {}", ma_so_hoc_sinh, user.user_id);
    Ok(Json(updated))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(ma_so_hoc_sinh): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.member_repo.delete(&ma_so_hoc_sinh).await?;
    info!("Member {} removed by {}", ma_so_hoc_sinh, user.user_id);
    Ok(Json(DELETED))
}
