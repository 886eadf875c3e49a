use crate::domain::{models::{dashboard::ClubScope, prize::Prize}, ports::PrizeRepository};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{types::Json, SqlitePool};

pub struct SqlitePrizeRepo {
    pool: SqlitePool,
}

impl SqlitePrizeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrizeRepository for SqlitePrizeRepo {
    async fn create(&self, prize: &Prize) -> Result<Prize, AppError> {
        sqlx::query_as::<_, Prize>(
            r#"INSERT INTO prizes (
                id, ten_giai_thuong, ngay_dat_giai, loai_giai, ghi_chu, anh_dat_giai, club, thanh_vien
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(prize.id)
            .bind(&prize.ten_giai_thuong)
            .bind(prize.ngay_dat_giai)
            .bind(&prize.loai_giai)
            .bind(&prize.ghi_chu)
            .bind(&prize.anh_dat_giai)
            .bind(prize.club)
            .bind(&prize.thanh_vien)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Prize>, AppError> {
        sqlx::query_as::<_, Prize>("SELECT * FROM prizes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Prize>, AppError> {
        sqlx::query_as::<_, Prize>(
            "SELECT * FROM prizes WHERE (? IS NULL OR club = ?) ORDER BY ngay_dat_giai DESC, id DESC"
        )
            .bind(club)
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, prize: &Prize) -> Result<Prize, AppError> {
        sqlx::query_as::<_, Prize>(
            r#"UPDATE prizes SET
                ten_giai_thuong=?, ngay_dat_giai=?, loai_giai=?, ghi_chu=?, anh_dat_giai=?, club=?, thanh_vien=?
               WHERE id=? RETURNING *"#
        )
            .bind(&prize.ten_giai_thuong)
            .bind(prize.ngay_dat_giai)
            .bind(&prize.loai_giai)
            .bind(&prize.ghi_chu)
            .bind(&prize.anh_dat_giai)
            .bind(prize.club)
            .bind(&prize.thanh_vien)
            .bind(prize.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Prize not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM prizes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Prize not found".into()));
        }
        Ok(())
    }

    async fn count(&self, scope: &ClubScope) -> Result<i64, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM prizes WHERE (? OR club IN (SELECT value FROM json_each(?)))"
        )
            .bind(all)
            .bind(Json(ids))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_dates(&self, scope: &ClubScope, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, NaiveDate>(
            r#"SELECT ngay_dat_giai FROM prizes
               WHERE (? OR club IN (SELECT value FROM json_each(?)))
               AND ngay_dat_giai BETWEEN ? AND ?"#
        )
            .bind(all)
            .bind(Json(ids))
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
