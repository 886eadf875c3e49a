use crate::domain::models::dashboard::ClubFinance;
use crate::domain::ports::{BudgetAllocationRepository, BudgetRepository};
use crate::error::AppError;

/// Rolls both ledgers of a club into one balance.
pub async fn club_finance(
    club_id: i64,
    budgets: &dyn BudgetRepository,
    allocations: &dyn BudgetAllocationRepository,
) -> Result<ClubFinance, AppError> {
    let (total_income, total_expense) = budgets.totals(club_id).await?;
    let total_allocated = allocations.total(club_id).await?;

    Ok(ClubFinance {
        club_id,
        total_allocated,
        total_income,
        total_expense,
        balance: total_allocated + total_income - total_expense,
    })
}
