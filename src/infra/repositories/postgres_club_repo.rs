use crate::domain::{models::club::Club, ports::ClubRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresClubRepo {
    pool: PgPool,
}

impl PostgresClubRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubRepository for PostgresClubRepo {
    async fn create(&self, club: &Club) -> Result<Club, AppError> {
        sqlx::query_as::<_, Club>(
            r#"INSERT INTO clubs (
                club_id, ten, logo, linh_vuc_hoat_dong, ngay_thanh_lap, giao_vien_phu_trach,
                mo_ta, quy_dinh, truong_ban_clb, ngan_sach, tinh_trang
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *"#
        )
            .bind(club.club_id)
            .bind(&club.ten)
            .bind(&club.logo)
            .bind(&club.linh_vuc_hoat_dong)
            .bind(club.ngay_thanh_lap)
            .bind(&club.giao_vien_phu_trach)
            .bind(&club.mo_ta)
            .bind(&club.quy_dinh)
            .bind(&club.truong_ban_clb)
            .bind(club.ngan_sach)
            .bind(&club.tinh_trang)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, club_id: i64) -> Result<Option<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE club_id = $1")
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY club_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_by_head_manager(&self, user_id: &str) -> Result<Vec<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE truong_ban_clb = $1 ORDER BY club_id ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clubs")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, club: &Club) -> Result<Club, AppError> {
        sqlx::query_as::<_, Club>(
            r#"UPDATE clubs SET
                ten=$1, logo=$2, linh_vuc_hoat_dong=$3, ngay_thanh_lap=$4, giao_vien_phu_trach=$5,
                mo_ta=$6, quy_dinh=$7, truong_ban_clb=$8, ngan_sach=$9, tinh_trang=$10
               WHERE club_id=$11 RETURNING *"#
        )
            .bind(&club.ten)
            .bind(&club.logo)
            .bind(&club.linh_vuc_hoat_dong)
            .bind(club.ngay_thanh_lap)
            .bind(&club.giao_vien_phu_trach)
            .bind(&club.mo_ta)
            .bind(&club.quy_dinh)
            .bind(&club.truong_ban_clb)
            .bind(club.ngan_sach)
            .bind(&club.tinh_trang)
            .bind(club.club_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Club not found".into()))
    }

    async fn delete(&self, club_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(club_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Club Deletion Failed: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Club not found".into()));
        }
        Ok(())
    }
}
