use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, accounts, auth, clubs, member, event, budget, report, prize, dashboard};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Accounts & Auth
        .route("/api/v1/accounts", post(accounts::register).get(accounts::list_accounts))
        .route("/api/v1/accounts/me", get(accounts::me))
        .route("/api/v1/accounts/{user_id}", get(accounts::get_account).put(accounts::update_account).delete(accounts::delete_account))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Clubs
        .route("/api/v1/clubs", post(clubs::create_club).get(clubs::list_clubs))
        .route("/api/v1/clubs/{club_id}", get(clubs::get_club).put(clubs::update_club).delete(clubs::delete_club))
        .route("/api/v1/clubs/{club_id}/finance", get(clubs::get_club_finance))

        // Members
        .route("/api/v1/members", post(member::create_member).get(member::list_members))
        .route("/api/v1/members/{ma_so_hoc_sinh}", get(member::get_member).put(member::update_member).delete(member::delete_member))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Finance
        .route("/api/v1/budgets", post(budget::create_budget).get(budget::list_budgets))
        .route("/api/v1/budgets/{id}", get(budget::get_budget).put(budget::update_budget).delete(budget::delete_budget))
        .route("/api/v1/budget-allocations", post(budget::create_allocation).get(budget::list_allocations))
        .route("/api/v1/budget-allocations/{id}", get(budget::get_allocation).put(budget::update_allocation).delete(budget::delete_allocation))

        // Reports & Prizes
        .route("/api/v1/reports", post(report::create_report).get(report::list_reports))
        .route("/api/v1/reports/{id}", get(report::get_report).put(report::update_report).delete(report::delete_report))
        .route("/api/v1/prizes", post(prize::create_prize).get(prize::list_prizes))
        .route("/api/v1/prizes/{id}", get(prize::get_prize).put(prize::update_prize).delete(prize::delete_prize))

        // Dashboards
        .route("/api/v1/dashboard/me", get(dashboard::my_dashboard))
        .route("/api/v1/dashboard/school", get(dashboard::school_dashboard))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
