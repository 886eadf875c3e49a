use crate::domain::{models::{dashboard::ClubScope, event::Event}, ports::EventRepository};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{types::Json, SqlitePool};

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, ten, ngay_to_chuc, thoi_gian, dia_diem, noi_dung,
                ngan_sach, nguoi_phu_trach, khach_moi, club
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
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
            "SELECT DISTINCT value FROM json_each(?) WHERE value NOT IN (SELECT id FROM events) ORDER BY value"
        )
            .bind(Json(ids))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE (? IS NULL OR club = ?) ORDER BY ngay_to_chuc DESC, id DESC"
        )
            .bind(club)
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                ten=?, ngay_to_chuc=?, thoi_gian=?, dia_diem=?, noi_dung=?,
                ngan_sach=?, nguoi_phu_trach=?, khach_moi=?, club=?
               WHERE id=? RETURNING *"#
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
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
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
               WHERE (? OR club IN (SELECT value FROM json_each(?)))
               AND ngay_to_chuc BETWEEN ? AND ?"#
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
