use crate::domain::{models::auth::RefreshTokenRecord, ports::AuthRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

const SESSION_COLUMNS: &str = "token_hash, user_id, family_id, generation_id, expires_at, created_at";

pub struct SqliteAuthRepo {
    pool: SqlitePool,
}

impl SqliteAuthRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for SqliteAuthRepo {
    async fn store(&self, record: &RefreshTokenRecord) -> Result<(), AppError> {
        sqlx::query(&format!("INSERT INTO refresh_tokens ({}) VALUES (?, ?, ?, ?, ?, ?)", SESSION_COLUMNS))
            .bind(&record.token_hash)
            .bind(&record.user_id)
            .bind(record.family_id)
            .bind(record.generation_id)
            .bind(record.expires_at)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        let sql = format!("SELECT {} FROM refresh_tokens WHERE token_hash = ?", SESSION_COLUMNS);
        let record = sqlx::query_as::<_, RefreshTokenRecord>(&sql)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        let sql = format!("DELETE FROM refresh_tokens WHERE token_hash = ? RETURNING {}", SESSION_COLUMNS);
        let record = sqlx::query_as::<_, RefreshTokenRecord>(&sql)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn revoke_family(&self, family_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE family_id = ?")
            .bind(family_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn revoke_all_for_account(&self, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> SqliteAuthRepo {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations/sqlite").run(&pool).await.unwrap();
        SqliteAuthRepo::new(pool)
    }

    fn session(hash: &str, user_id: &str, family_id: Uuid) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord {
            token_hash: hash.to_string(),
            user_id: user_id.to_string(),
            family_id,
            generation_id: 1,
            expires_at: now + Duration::days(7),
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_consume_spends_a_token_once() {
        let repo = repo().await;
        repo.store(&session("h1", "hs001", Uuid::new_v4())).await.unwrap();

        let first = repo.consume("h1").await.unwrap();
        assert_eq!(first.map(|r| r.user_id), Some("hs001".to_string()));
        assert!(repo.consume("h1").await.unwrap().is_none());
        assert!(repo.find("h1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revocation_scopes() {
        let repo = repo().await;
        let family = Uuid::new_v4();
        repo.store(&session("a1", "hs001", family)).await.unwrap();
        repo.store(&session("a2", "hs001", Uuid::new_v4())).await.unwrap();
        repo.store(&session("b1", "hs002", Uuid::new_v4())).await.unwrap();

        assert_eq!(repo.revoke_family(family).await.unwrap(), 1);
        assert_eq!(repo.revoke_all_for_account("hs001").await.unwrap(), 1);
        assert!(repo.find("b1").await.unwrap().is_some());
    }
}
