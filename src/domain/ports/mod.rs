use crate::domain::models::{
    account::Account, auth::RefreshTokenRecord, club::Club, event::Event,
    budget::{Budget, BudgetAllocation}, member::{Member, RecentMember},
    prize::Prize, report::Report, dashboard::ClubScope,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Per-kind integer sequences.
///
/// `next_value` must increment and read in a single storage statement: two
/// callers racing on the same kind never observe the same value.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    async fn next_value(&self, kind: &str) -> Result<i64, AppError>;
    async fn current_value(&self, kind: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn create(&self, club: &Club) -> Result<Club, AppError>;
    async fn find_by_id(&self, club_id: i64) -> Result<Option<Club>, AppError>;
    async fn list(&self) -> Result<Vec<Club>, AppError>;
    async fn list_by_head_manager(&self, user_id: &str) -> Result<Vec<Club>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update(&self, club: &Club) -> Result<Club, AppError>;
    async fn delete(&self, club_id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: &Member) -> Result<Member, AppError>;
    async fn find_by_id(&self, ma_so_hoc_sinh: &str) -> Result<Option<Member>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<Member>, AppError>;
    async fn update(&self, member: &Member) -> Result<Member, AppError>;
    async fn delete(&self, ma_so_hoc_sinh: &str) -> Result<(), AppError>;
    async fn count(&self, scope: &ClubScope) -> Result<i64, AppError>;
    /// Most recently joined first, names of their clubs attached.
    async fn list_recent(&self, scope: &ClubScope, limit: i64) -> Result<Vec<RecentMember>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Dates of events within `[start, end]`, both inclusive.
    async fn list_dates(&self, scope: &ClubScope, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError>;
}

#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn create(&self, budget: &Budget) -> Result<Budget, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Budget>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<Budget>, AppError>;
    async fn update(&self, budget: &Budget) -> Result<Budget, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// (income, expense) totals for one club.
    async fn totals(&self, club: i64) -> Result<(f64, f64), AppError>;
}

#[async_trait]
pub trait BudgetAllocationRepository: Send + Sync {
    async fn create(&self, allocation: &BudgetAllocation) -> Result<BudgetAllocation, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BudgetAllocation>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<BudgetAllocation>, AppError>;
    async fn update(&self, allocation: &BudgetAllocation) -> Result<BudgetAllocation, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn total(&self, club: i64) -> Result<f64, AppError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: &Report) -> Result<Report, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<Report>, AppError>;
    async fn update(&self, report: &Report) -> Result<Report, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait PrizeRepository: Send + Sync {
    async fn create(&self, prize: &Prize) -> Result<Prize, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Prize>, AppError>;
    async fn list(&self, club: Option<i64>) -> Result<Vec<Prize>, AppError>;
    async fn update(&self, prize: &Prize) -> Result<Prize, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn count(&self, scope: &ClubScope) -> Result<i64, AppError>;
    async fn list_dates(&self, scope: &ClubScope, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    /// Inserts a manager only while no manager exists; `None` when one already does.
    async fn create_first_manager(&self, account: &Account) -> Result<Option<Account>, AppError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Account>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
    async fn list(&self) -> Result<Vec<Account>, AppError>;
    async fn update(&self, account: &Account) -> Result<Account, AppError>;
    async fn delete(&self, user_id: &str) -> Result<(), AppError>;
    async fn count_by_role(&self, role: &str) -> Result<i64, AppError>;
}

/// Refresh-token sessions. Raw tokens never reach storage, only their hashes.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn store(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    /// Removes and returns the token in one step, so a token is spent at most once.
    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn revoke_family(&self, family_id: Uuid) -> Result<u64, AppError>;
    async fn revoke_all_for_account(&self, user_id: &str) -> Result<u64, AppError>;
}
