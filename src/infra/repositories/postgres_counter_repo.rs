use crate::domain::ports::CounterRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

pub struct PostgresCounterRepo {
    pool: PgPool,
}

impl PostgresCounterRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PostgresCounterRepo {
    async fn next_value(&self, kind: &str) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>(
            "INSERT INTO counters (kind, seq) VALUES ($1, 1) ON CONFLICT (kind) DO UPDATE SET seq = counters.seq + 1 RETURNING seq"
        )
            .bind(kind)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        debug!("Minted {} #{}", kind, value);
        Ok(value)
    }

    async fn current_value(&self, kind: &str) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>("SELECT seq FROM counters WHERE kind = $1")
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(value.unwrap_or(0))
    }
}
