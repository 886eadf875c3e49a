use crate::domain::{models::account::Account, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAccountRepo {
    pool: SqlitePool,
}

impl SqliteAccountRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (user_id, ten, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
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
        // A single write statement: SQLite takes the write lock before the existence check runs.
        sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (user_id, ten, email, password_hash, role, created_at)
               SELECT ?, ?, ?, ?, ?, ?
               WHERE NOT EXISTS (SELECT 1 FROM accounts WHERE role = ?)
               RETURNING *"#
        )
            .bind(&account.user_id)
            .bind(&account.ten)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(account.created_at)
            .bind(&account.role)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = ?")
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
            "UPDATE accounts SET ten = ?, email = ?, password_hash = ?, role = ? WHERE user_id = ? RETURNING *"
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
        let result = sqlx::query("DELETE FROM accounts WHERE user_id = ?")
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
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE role = ?")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
