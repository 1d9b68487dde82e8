use crate::domain::{models::deal::Deal, ports::DealRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresDealRepo {
    pool: PgPool,
}

impl PostgresDealRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DealRepository for PostgresDealRepo {
    async fn create(&self, deal: &Deal) -> Result<Deal, AppError> {
        sqlx::query_as::<_, Deal>(
            "INSERT INTO deals (id, listing_id, discount_percent, valid_until, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *"
        )
            .bind(&deal.id).bind(&deal.listing_id).bind(deal.discount_percent)
            .bind(deal.valid_until).bind(deal.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Deal>, AppError> {
        sqlx::query_as::<_, Deal>("SELECT * FROM deals WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Deal>, AppError> {
        sqlx::query_as::<_, Deal>("SELECT * FROM deals ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, deal: &Deal) -> Result<Deal, AppError> {
        sqlx::query_as::<_, Deal>(
            "UPDATE deals SET discount_percent = $1, valid_until = $2 WHERE id = $3 RETURNING *"
        )
            .bind(deal.discount_percent).bind(deal.valid_until).bind(&deal.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM deals WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Deal not found".into())); }
        Ok(())
    }
}
