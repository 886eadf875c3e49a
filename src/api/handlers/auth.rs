use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::domain::models::{account::Account, auth::{AuthResponse, UserProfile}};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use argon2::{PasswordHash, Argon2, PasswordVerifier};
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.find_by_id(&payload.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| {
            warn!("Failed login for {}", payload.user_id);
            AppError::Unauthorized
        })?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&account).await?;

    set_cookies(&cookies, &access_jwt, &refresh_token);

    info!("Account logged in: {}", account.user_id);

    Ok(Json(auth_response(csrf_token, account)))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let refresh_cookie = cookies.get("refresh_token").ok_or(AppError::Unauthorized)?;
    let raw_token = refresh_cookie.value();

    let user_id = state.auth_service.refresh_owner(raw_token).await?;
    let account = state.account_repo.find_by_id(&user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let (new_access, new_refresh, new_csrf) = state.auth_service.refresh(raw_token, &account).await?;

    set_cookies(&cookies, &new_access, &new_refresh);

    info!("Token refreshed for account: {}", account.user_id);

    Ok(Json(auth_response(new_csrf, account)))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get("refresh_token") {
        if let Err(e) = state.auth_service.logout(cookie.value()).await {
            warn!("Refresh token revocation failed on logout: {}", e);
        }
    }

    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    cookies.remove(Cookie::build(("refresh_token", "")).path("/").into());

    info!("Account logged out");

    Ok(StatusCode::OK)
}

fn auth_response(csrf_token: String, account: Account) -> AuthResponse {
    AuthResponse {
        csrf_token,
        user: UserProfile {
            user_id: account.user_id,
            ten: account.ten,
            role: account.role,
        },
    }
}

fn set_cookies(cookies: &Cookies, access: &str, refresh: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(15));
    cookies.add(access_c);

    let mut refresh_c = Cookie::new("refresh_token", refresh.to_string());
    refresh_c.set_http_only(true);
    refresh_c.set_secure(true);
    refresh_c.set_same_site(SameSite::Strict);
    refresh_c.set_path("/");
    refresh_c.set_max_age(Duration::days(7));
    cookies.add(refresh_c);
}
