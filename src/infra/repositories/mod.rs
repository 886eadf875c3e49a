use crate::domain::models::dashboard::ClubScope;

pub mod sqlite_account_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_budget_allocation_repo;
pub mod sqlite_budget_repo;
pub mod sqlite_club_repo;
pub mod sqlite_counter_repo;
pub mod sqlite_event_repo;
pub mod sqlite_member_repo;
pub mod sqlite_prize_repo;
pub mod sqlite_report_repo;

pub mod postgres_account_repo;
pub mod postgres_auth_repo;
pub mod postgres_budget_allocation_repo;
pub mod postgres_budget_repo;
pub mod postgres_club_repo;
pub mod postgres_counter_repo;
pub mod postgres_event_repo;
pub mod postgres_member_repo;
pub mod postgres_prize_repo;
pub mod postgres_report_repo;

/// Bind values for a `(<all> OR club IN <ids>)` filter.
pub(crate) fn scope_binds(scope: &ClubScope) -> (bool, Vec<i64>) {
    match scope {
        ClubScope::All => (true, Vec::new()),
        ClubScope::Clubs(ids) => (false, ids.clone()),
    }
}
