use crate::domain::{models::budget::Budget, ports::BudgetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBudgetRepo {
    pool: PgPool,
}

impl PostgresBudgetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetRepository for PostgresBudgetRepo {
    async fn create(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            r#"INSERT INTO budgets (id, ten, khoan_chi, khoan_thu, ngay, thanh_vien_phu_trach, mo_ta, club)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Budget>, AppError> {
        sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets WHERE ($1::BIGINT IS NULL OR club = $1) ORDER BY ngay DESC, id DESC"
        )
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, budget: &Budget) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            r#"UPDATE budgets SET
                ten=$1, khoan_chi=$2, khoan_thu=$3, ngay=$4, thanh_vien_phu_trach=$5, mo_ta=$6, club=$7
               WHERE id=$8 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
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
            r#"SELECT COALESCE(SUM(khoan_thu), 0)::DOUBLE PRECISION,
                      COALESCE(SUM(khoan_chi), 0)::DOUBLE PRECISION
               FROM budgets WHERE club = $1"#
        )
            .bind(club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
