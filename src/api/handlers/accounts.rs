use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::DELETED;
use crate::api::extractors::auth::{AuthUser, ManagerUser, MaybeAuthUser};
use crate::domain::models::account::{Account, AccountPatch, NewAccount, ROLE_MANAGER};
use crate::domain::models::auth::Identity;
use crate::domain::services::schema;
use crate::error::AppError;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

fn manager_accounts_only() -> AppError {
    AppError::Forbidden("Only managers can create manager accounts".into())
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal)
}

fn ensure_self_or_manager(identity: &Identity, user_id: &str) -> Result<(), AppError> {
    if identity.user_id == user_id || identity.is_manager() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Only the account owner or a manager can do this".into()))
    }
}

/// Refuses to leave the registry without any manager.
async fn ensure_not_last_manager(state: &AppState, account: &Account) -> Result<(), AppError> {
    if account.role == ROLE_MANAGER && state.account_repo.count_by_role(ROLE_MANAGER).await? <= 1 {
        return Err(AppError::Conflict(format!("{} is the last manager", account.user_id)));
    }
    Ok(())
}

/// Open registration for students. Manager accounts need a manager caller,
/// except for the very first one.
pub async fn register(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewAccount = schema::ACCOUNT.parse_create(payload)?;

    let bootstrap = input.role == ROLE_MANAGER && !caller.as_ref().is_some_and(|c| c.is_manager());
    if bootstrap && state.account_repo.count_by_role(ROLE_MANAGER).await? > 0 {
        warn!("Refused manager registration for {} without a manager session", input.user_id);
        return Err(manager_accounts_only());
    }

    if state.account_repo.find_by_id(&input.user_id).await?.is_some() {
        return Err(AppError::Conflict(format!("Account {} already exists", input.user_id)));
    }
    if state.account_repo.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&input.password)?;
    let account = Account::new(input, password_hash);

    let created = if bootstrap {
        state.account_repo.create_first_manager(&account).await?
            .ok_or_else(|| {
                warn!("Lost the first-manager race for {}", account.user_id);
                manager_accounts_only()
            })?
    } else {
        state.account_repo.create(&account).await?
    };

    info!("Registered account {} as {}", created.user_id, created.role);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.find_by_id(&identity.user_id).await?
        .ok_or(AppError::NotFound(format!("Account {} not found", identity.user_id)))?;
    Ok(Json(account))
}

pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    ManagerUser(_): ManagerUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.account_repo.list().await?;
    Ok(Json(accounts))
}

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_manager(&identity, &user_id)?;
    let account = state.account_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound(format!("Account {} not found", user_id)))?;
    Ok(Json(account))
}

pub async fn update_account(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(user_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_manager(&identity, &user_id)?;

    let mut account = state.account_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound(format!("Account {} not found", user_id)))?;
    let patch: AccountPatch = schema::ACCOUNT_PATCH.parse_update(payload)?;

    if let Some(role) = &patch.role {
        if *role != account.role {
            if !identity.is_manager() {
                warn!("{} tried to change the role of {}", identity.user_id, user_id);
                return Err(AppError::Forbidden("Only managers can change roles".into()));
            }
            ensure_not_last_manager(&state, &account).await?;
        }
    }

    if let Some(email) = &patch.email {
        if let Some(holder) = state.account_repo.find_by_email(email).await? {
            if holder.user_id != account.user_id {
                return Err(AppError::Conflict("Email already registered".into()));
            }
        }
    }

    let revoke = patch.changes_credentials(&account);
    let password_hash = patch.password.as_deref().map(hash_password).transpose()?;
    account.apply(patch, password_hash);

    let updated = state.account_repo.update(&account).await?;
    if revoke {
        state.auth_service.revoke_sessions(&updated.user_id).await?;
    }

    info!("Account {} updated by {}", updated.user_id, identity.user_id);
    Ok(Json(updated))
}

pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_manager(&identity, &user_id)?;

    let account = state.account_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound(format!("Account {} not found", user_id)))?;
    ensure_not_last_manager(&state, &account).await?;

    state.account_repo.delete(&user_id).await?;
    state.auth_service.revoke_sessions(&user_id).await?;

    info!("Account {} deleted by {}", user_id, identity.user_id);
    Ok(Json(DELETED))
}
