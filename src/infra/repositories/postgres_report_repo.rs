use crate::domain::{models::report::Report, ports::ReportRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresReportRepo {
    pool: PgPool,
}

impl PostgresReportRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepo {
    async fn create(&self, report: &Report) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(
            r#"INSERT INTO reports (
                id, ten_bao_cao, ngay_bao_cao, nhan_su_phu_trach, danh_sach_su_kien,
                tong_ngan_sach_chi, tong_thu, ket_qua_dat_duoc, club
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *"#
        )
            .bind(report.id)
            .bind(&report.ten_bao_cao)
            .bind(report.ngay_bao_cao)
            .bind(&report.nhan_su_phu_trach)
            .bind(&report.danh_sach_su_kien)
            .bind(report.tong_ngan_sach_chi)
            .bind(report.tong_thu)
            .bind(&report.ket_qua_dat_duoc)
            .bind(report.club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, AppError> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Report>, AppError> {
        sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE ($1::BIGINT IS NULL OR club = $1) ORDER BY ngay_bao_cao DESC, id DESC"
        )
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, report: &Report) -> Result<Report, AppError> {
        sqlx::query_as::<_, Report>(
            r#"UPDATE reports SET
                ten_bao_cao=$1, ngay_bao_cao=$2, nhan_su_phu_trach=$3, danh_sach_su_kien=$4,
                tong_ngan_sach_chi=$5, tong_thu=$6, ket_qua_dat_duoc=$7, club=$8
               WHERE id=$9 RETURNING *"#
        )
            .bind(&report.ten_bao_cao)
            .bind(report.ngay_bao_cao)
            .bind(&report.nhan_su_phu_trach)
            .bind(&report.danh_sach_su_kien)
            .bind(report.tong_ngan_sach_chi)
            .bind(report.tong_thu)
            .bind(&report.ket_qua_dat_duoc)
            .bind(report.club)
            .bind(report.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Report not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Report not found".into()));
        }
        Ok(())
    }
}
