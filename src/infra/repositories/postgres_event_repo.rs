use crate::domain::{models::{dashboard::ClubScope, event::Event}, ports::EventRepository};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, ten, ngay_to_chuc, thoi_gian, dia_diem, noi_dung,
                ngan_sach, nguoi_phu_trach, khach_moi, club
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *"#
        )
            .bind(event.id)
            .bind(&event.ten)
            .bind(event.ngay_to_chuc)
            .bind(&event.thoi_gian)
            .bind(&event.dia_diem)
            .bind(&event.noi_dung)
            .bind(event.ngan_sach)
            .bind(&event.nguoi_phu_trach)
            .bind(&event.khach_moi)
            .bind(event.club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        sqlx::query_scalar::<_, i64>(
            r#"SELECT DISTINCT t.id FROM UNNEST($1::BIGINT[]) AS t(id)
               WHERE NOT EXISTS (SELECT 1 FROM events e WHERE e.id = t.id)
               ORDER BY t.id"#
        )
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE ($1::BIGINT IS NULL OR club = $1) ORDER BY ngay_to_chuc DESC, id DESC"
        )
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                ten=$1, ngay_to_chuc=$2, thoi_gian=$3, dia_diem=$4, noi_dung=$5,
                ngan_sach=$6, nguoi_phu_trach=$7, khach_moi=$8, club=$9
               WHERE id=$10 RETURNING *"#
        )
            .bind(&event.ten)
            .bind(event.ngay_to_chuc)
            .bind(&event.thoi_gian)
            .bind(&event.dia_diem)
            .bind(&event.noi_dung)
            .bind(event.ngan_sach)
            .bind(&event.nguoi_phu_trach)
            .bind(&event.khach_moi)
            .bind(event.club)
            .bind(event.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Event not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }

    async fn list_dates(&self, scope: &ClubScope, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, NaiveDate>(
            r#"SELECT ngay_to_chuc FROM events
               WHERE ($1 OR club = ANY($2))
               AND ngay_to_chuc BETWEEN $3 AND $4"#
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
