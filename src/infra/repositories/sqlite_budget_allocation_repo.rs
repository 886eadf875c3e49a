use crate::domain::{models::budget::BudgetAllocation, ports::BudgetAllocationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBudgetAllocationRepo {
    pool: SqlitePool,
}

impl SqliteBudgetAllocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetAllocationRepository for SqliteBudgetAllocationRepo {
    async fn create(&self, allocation: &BudgetAllocation) -> Result<BudgetAllocation, AppError> {
        sqlx::query_as::<_, BudgetAllocation>(
            "INSERT INTO budget_allocations (id, so_tien, muc_dich, ngay_cap_phat, club) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(allocation.id)
            .bind(allocation.so_tien)
            .bind(&allocation.muc_dich)
            .bind(allocation.ngay_cap_phat)
            .bind(allocation.club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BudgetAllocation>, AppError> {
        sqlx::query_as::<_, BudgetAllocation>("SELECT * FROM budget_allocations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<BudgetAllocation>, AppError> {
        sqlx::query_as::<_, BudgetAllocation>(
            "SELECT * FROM budget_allocations WHERE (? IS NULL OR club = ?) ORDER BY ngay_cap_phat DESC, id DESC"
        )
            .bind(club)
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, allocation: &BudgetAllocation) -> Result<BudgetAllocation, AppError> {
        sqlx::query_as::<_, BudgetAllocation>(
            "UPDATE budget_allocations SET so_tien=?, muc_dich=?, ngay_cap_phat=?, club=? WHERE id=? RETURNING *"
        )
            .bind(allocation.so_tien)
            .bind(&allocation.muc_dich)
            .bind(allocation.ngay_cap_phat)
            .bind(allocation.club)
            .bind(allocation.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Budget allocation not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM budget_allocations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget allocation not found".into()));
        }
        Ok(())
    }

    async fn total(&self, club: i64) -> Result<f64, AppError> {
        sqlx::query_scalar::<_, f64>(
            "SELECT CAST(COALESCE(SUM(so_tien), 0) AS REAL) FROM budget_allocations WHERE club = ?"
        )
            .bind(club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
