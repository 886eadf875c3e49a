use crate::domain::{
    models::{dashboard::ClubScope, member::{Member, RecentMember}},
    ports::MemberRepository,
};
use crate::error::AppError;
use crate::infra::repositories::scope_binds;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresMemberRepo {
    pool: PgPool,
}

impl PostgresMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepo {
    async fn create(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"INSERT INTO members (
                ma_so_hoc_sinh, ho_ten, gioi_tinh, lop, ban, lien_he,
                ngay_tham_gia, vai_tro, tinh_trang, club
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE ma_so_hoc_sinh = $1")
            .bind(ma_so_hoc_sinh)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, club: Option<i64>) -> Result<Vec<Member>, AppError> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE ($1::BIGINT IS NULL OR club = $1) ORDER BY ma_so_hoc_sinh ASC"
        )
            .bind(club)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"UPDATE members SET
                ho_ten=$1, gioi_tinh=$2, lop=$3, ban=$4, lien_he=$5,
                ngay_tham_gia=$6, vai_tro=$7, tinh_trang=$8, club=$9
               WHERE ma_so_hoc_sinh=$10 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM members WHERE ma_so_hoc_sinh = $1")
            .bind(ma_so_hoc_sinh)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Member Deletion Failed: {:?}", e);
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".into()));
        }
        Ok(())
    }

    async fn count(&self, scope: &ClubScope) -> Result<i64, AppError> {
        let (all, ids) = scope_binds(scope);
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE ($1 OR club = ANY($2))")
            .bind(all)
            .bind(ids)
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
               WHERE ($1 OR m.club = ANY($2))
               ORDER BY m.ngay_tham_gia DESC, m.ma_so_hoc_sinh ASC
               LIMIT $3"#
        )
            .bind(all)
            .bind(ids)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
