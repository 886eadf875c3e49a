use crate::domain::{
    models::{dashboard::ClubScope, member::{Member, RecentMember}},
    ports::MemberRepository,
};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};
use tracing::error;

pub struct SqliteMemberRepo {
    pool: SqlitePool,
}

impl SqliteMemberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepo {
    async fn create(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"INSERT INTO members (
                ma_so_hoc_sinh, ho_ten, gioi_tinh, lop, ban, lien_he,
                ngay_tham_gia, vai_tro, tinh_trang, club
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&member.ma_so_hoc_sinh)
            .bind(&member.ho_ten)
            .bind(&member.gioi_tinh)
            .bind(&member.lop)
            .bind(&member.ban)
            .bind(&member.lien_he)
            .bind(member.ngay_tham_gia)
            .bind(&member.vai_tro)
            .bind(&member.tinh_trang)
            .bind(member.club)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, ma_so_hoc_sinh: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE ma_so_hoc_sinh = ?")
            .bind(ma_so_hoc_sinh)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Member>, AppError> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE (? IS NULL OR club = ?) ORDER BY ma_so_hoc_sinh ASC"
        )
            .bind(club)
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"UPDATE members SET
                ho_ten=?, gioi_tinh=?, lop=?, ban=?, lien_he=?,
                ngay_tham_gia=?, vai_tro=?, tinh_trang=?, club=?
               WHERE ma_so_hoc_sinh=? RETURNING *"#
        )
            .bind(&member.ho_ten)
            .bind(&member.gioi_tinh)
            .bind(&member.lop)
            .bind(&member.ban)
            .bind(&member.lien_he)
            .bind(member.ngay_tham_gia)
            .bind(&member.vai_tro)
            .bind(&member.tinh_trang)
            .bind(member.club)
            .bind(&member.ma_so_hoc_sinh)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Member not found".into()))
    }

    async fn delete(&self, ma_so_hoc_sinh: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE ma_so_hoc_sinh = ?")
            .bind(ma_so_hoc_sinh)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Member Deletion Failed: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".into()));
        }
        Ok(())
    }

    async fn count(&self, scope: &ClubScope) -> Result<i64, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE (? OR club IN (SELECT value FROM json_each(?)))"
        )
            .bind(all)
            .bind(Json(ids))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_recent(&self, scope: &ClubScope, limit: i64) -> Result<Vec<RecentMember>, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_as::<_, RecentMember>(
            r#"SELECT m.ma_so_hoc_sinh, m.ho_ten, m.ngay_tham_gia, m.club, c.ten AS ten_club
               FROM members m
               JOIN clubs c ON c.club_id = m.club
               WHERE (? OR m.club IN (SELECT value FROM json_each(?)))
               ORDER BY m.ngay_tham_gia DESC, m.ma_so_hoc_sinh ASC
               LIMIT ?"#
        )
            .bind(all)
            .bind(Json(ids))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
