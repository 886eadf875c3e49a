use crate::domain::ports::CounterRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

pub struct SqliteCounterRepo {
    pool: SqlitePool,
}

impl SqliteCounterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for SqliteCounterRepo {
    async fn next_value(&self, kind: &str) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>(
            "INSERT INTO counters (kind, seq) VALUES (?, 1) ON CONFLICT(kind) DO UPDATE SET seq = seq + 1 RETURNING seq"
        )
            .bind(kind)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        debug!("Minted {} #{}", kind, value);
        Ok(value)
    }

    async fn current_value(&self, kind: &str) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>("SELECT seq FROM counters WHERE kind = ?")
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(value.unwrap_or(0))
    }
}
