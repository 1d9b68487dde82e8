use crate::domain::{models::listing::{Listing, ListingFilter}, ports::ListingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresListingRepo {
    pool: PgPool,
}

impl PostgresListingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepo {
    async fn create(&self, listing: &Listing) -> Result<Listing, AppError> {
        sqlx::query_as::<_, Listing>(
            "INSERT INTO listings (id, title, description, listing_type, city, country, price, currency, available_stock, max_guests, images, amenities, host_id, rating, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING *"
        )
            .bind(&listing.id).bind(&listing.title).bind(&listing.description).bind(&listing.listing_type)
            .bind(&listing.city).bind(&listing.country).bind(listing.price).bind(&listing.currency)
            .bind(listing.available_stock).bind(listing.max_guests).bind(&listing.images).bind(&listing.amenities)
            .bind(&listing.host_id).bind(listing.rating).bind(listing.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, AppError> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM listings WHERE 1=1");
        if let Some(city) = &filter.city {
            query.push(" AND city = ").push_bind(city);
        }
        if let Some(listing_type) = &filter.listing_type {
            query.push(" AND listing_type = ").push_bind(listing_type);
        }
        if let Some(min_price) = filter.min_price {
            query.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ").push_bind(max_price);
        }
        query.push(" ORDER BY created_at DESC");
        query.build_query_as::<Listing>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, listing: &Listing) -> Result<Listing, AppError> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET title=$1, description=$2, listing_type=$3, city=$4, country=$5, price=$6, currency=$7, available_stock=$8, max_guests=$9, images=$10, amenities=$11
             WHERE id=$12
             RETURNING *"
        )
            .bind(&listing.title).bind(&listing.description).bind(&listing.listing_type)
            .bind(&listing.city).bind(&listing.country).bind(listing.price).bind(&listing.currency)
            .bind(listing.available_stock).bind(listing.max_guests).bind(&listing.images).bind(&listing.amenities)
            .bind(&listing.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Package not found".into())); }
        Ok(())
    }
}
