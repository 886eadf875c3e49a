use crate::domain::{models::{dashboard::ClubScope, prize::Prize}, ports::PrizeRepository};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresPrizeRepo {
    pool: PgPool,
}

impl PostgresPrizeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrizeRepository for PostgresPrizeRepo {
    async fn create(&self, prize: &Prize) -> Result<Prize, AppError> {
        sqlx::query_as::<_, Prize>(
            r#"INSERT INTO prizes (
                id, ten_giai_thuong, ngay_dat_giai, loai_giai, ghi_chu, anh_dat_giai, club, thanh_vien
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
        sqlx::query_as::<_, Prize>("SELECT * FROM prizes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Prize>, AppError> {
        sqlx::query_as::<_, Prize>(
            "SELECT * FROM prizes WHERE ($1::BIGINT IS NULL OR club = $1) ORDER BY ngay_dat_giai DESC, id DESC"
        )
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, prize: &Prize) -> Result<Prize, AppError> {
        sqlx::query_as::<_, Prize>(
            r#"UPDATE prizes SET
                ten_giai_thuong=$1, ngay_dat_giai=$2, loai_giai=$3, ghi_chu=$4, anh_dat_giai=$5, club=$6, thanh_vien=$7
               WHERE id=$8 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM prizes WHERE id = $1")
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
            "SELECT COUNT(*) FROM prizes WHERE ($1 OR club = ANY($2))"
        )
            .bind(all)
            .bind(ids)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_dates(&self, scope: &ClubScope, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, NaiveDate>(
            r#"SELECT ngay_dat_giai FROM prizes
               WHERE ($1 OR club = ANY($2))
               AND ngay_dat_giai BETWEEN $3 AND $4"#
        )
            .bind(all)
            .bind(ids)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
