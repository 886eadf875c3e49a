use crate::domain::{models::budget::Budget, ports::BudgetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBudgetRepo {
    pool: SqlitePool,
}

impl SqliteBudgetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetRepository for SqliteBudgetRepo {
    async fn create(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            r#"INSERT INTO budgets (id, ten, khoan_chi, khoan_thu, ngay, thanh_vien_phu_trach, mo_ta, club)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(budget.id)
            .bind(&budget.ten)
            .bind(budget.khoan_chi)
            .bind(budget.khoan_thu)
            .bind(budget.ngay)
            .bind(&budget.thanh_vien_phu_trach)
            .bind(&budget.mo_ta)
            .bind(budget.club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Budget>, AppError> {
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Budget>, AppError> {
        sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets WHERE (? IS NULL OR club = ?) ORDER BY ngay DESC, id DESC"
        )
            .bind(club)
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            r#"UPDATE budgets SET
                ten=?, khoan_chi=?, khoan_thu=?, ngay=?, thanh_vien_phu_trach=?, mo_ta=?, club=?
               WHERE id=? RETURNING *"#
        )
            .bind(&budget.ten)
            .bind(budget.khoan_chi)
            .bind(budget.khoan_thu)
            .bind(budget.ngay)
            .bind(&budget.thanh_vien_phu_trach)
            .bind(&budget.mo_ta)
            .bind(budget.club)
            .bind(budget.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Budget not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget not found".into()));
        }
        Ok(())
    }

    async fn totals(&self, club: i64) -> Result<(f64, f64), AppError> {
        sqlx::query_as::<_, (f64, f64)>(
            "SELECT CAST(COALESCE(SUM(khoan_thu), 0) AS REAL), CAST(COALESCE(SUM(khoan_chi), 0) AS REAL) FROM budgets WHERE club = ?"
        )
            .bind(club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
