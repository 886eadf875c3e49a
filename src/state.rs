use std::sync::Arc;
use crate::domain::ports::{
    AccountRepository, AuthRepository, BudgetAllocationRepository, BudgetRepository,
    ClubRepository, CounterRepository, EventRepository, MemberRepository,
    PrizeRepository, ReportRepository,
};
use crate::domain::services::{
    auth_service::AuthService, dashboard::DashboardService, integrity::IntegrityChecker,
};
use crate::config::Config;
use crate::error::AppError;

/// One implementation per port, all on the same backend.
#[derive(Clone)]
pub struct Repositories {
    pub counters: Arc<dyn CounterRepository>,
    pub clubs: Arc<dyn ClubRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub events: Arc<dyn EventRepository>,
    pub budgets: Arc<dyn BudgetRepository>,
    pub allocations: Arc<dyn BudgetAllocationRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub prizes: Arc<dyn PrizeRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub auth: Arc<dyn AuthRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub counter_repo: Arc<dyn CounterRepository>,
    pub club_repo: Arc<dyn ClubRepository>,
    pub member_repo: Arc<dyn MemberRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub budget_repo: Arc<dyn BudgetRepository>,
    pub allocation_repo: Arc<dyn BudgetAllocationRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub prize_repo: Arc<dyn PrizeRepository>,
    pub account_repo: Arc<dyn AccountRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub integrity: Arc<IntegrityChecker>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories) -> Result<Self, AppError> {
        let auth_service = Arc::new(AuthService::new(repos.auth.clone(), config.clone())?);
        let integrity = Arc::new(IntegrityChecker::new(
            repos.clubs.clone(),
            repos.members.clone(),
            repos.events.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(
            repos.clubs.clone(),
            repos.members.clone(),
            repos.events.clone(),
            repos.prizes.clone(),
        ));

        Ok(Self {
            config,
            counter_repo: repos.counters,
            club_repo: repos.clubs,
            member_repo: repos.members,
            event_repo: repos.events,
            budget_repo: repos.budgets,
            allocation_repo: repos.allocations,
            report_repo: repos.reports,
            prize_repo: repos.prizes,
            account_repo: repos.accounts,
            auth_repo: repos.auth,
            auth_service,
            integrity,
            dashboard,
        })
    }
}
