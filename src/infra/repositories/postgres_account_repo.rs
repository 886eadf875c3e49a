use crate::domain::{models::account::Account, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresAccountRepo {
    pool: PgPool,
}

impl PostgresAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (user_id, ten, email, password_hash, role, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
            .bind(&account.user_id)
            .bind(&account.ten)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_first_manager(&self, account: &Account) -> Result<Option<Account>, AppError> {
        let mut tx = self.pool.begin().await?;
        // Serialises concurrent bootstraps; plain reads are not blocked.
        sqlx::query("LOCK TABLE accounts IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let created = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (user_id, ten, email, password_hash, role, created_at)
               SELECT $1, $2, $3, $4, $5, $6
               WHERE NOT EXISTS (SELECT 1 FROM accounts WHERE role = $7)
               RETURNING *"#
        )
            .bind(&account.user_id)
            .bind(&account.ten)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(account.created_at)
            .bind(&account.role)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at, user_id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET ten = $1, email = $2, password_hash = $3, role = $4 WHERE user_id = $5 RETURNING *"
        )
            .bind(&account.ten)
            .bind(account.email.to_lowercase())
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(&account.user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound(format!("Account {} not found", account.user_id)))
    }

    async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Account {} not found", user_id)));
        }
        Ok(())
    }

    async fn count_by_role(&self, role: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
