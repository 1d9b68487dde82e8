use crate::domain::{models::account::Account, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

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
            "INSERT INTO accounts (id, name, email, password_hash, role, is_verified, is_active, reset_otp_hash, reset_otp_expires_at, created_at, last_login)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&account.id).bind(&account.name).bind(&account.email).bind(&account.password_hash)
            .bind(&account.role).bind(account.is_verified).bind(account.is_active)
            .bind(&account.reset_otp_hash).bind(account.reset_otp_expires_at)
            .bind(account.created_at).bind(account.last_login)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = ?").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn mark_verified(&self, id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("UPDATE accounts SET is_verified = 1 WHERE id = ? RETURNING *").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("User not found".into())); }
        Ok(())
    }
    async fn set_reset_otp(&self, id: &str, otp_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET reset_otp_hash = ?, reset_otp_expires_at = ? WHERE id = ?")
            .bind(otp_hash).bind(expires_at).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET password_hash = ?, reset_otp_hash = NULL, reset_otp_expires_at = NULL WHERE id = ?")
            .bind(password_hash).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn touch_last_login(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET last_login = ? WHERE id = ?")
            .bind(Utc::now()).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
