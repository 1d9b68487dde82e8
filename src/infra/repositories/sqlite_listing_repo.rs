use crate::domain::{models::listing::{Listing, ListingFilter}, ports::ListingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteListingRepo {
    pool: SqlitePool,
}

impl SqliteListingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for SqliteListingRepo {
    async fn create(&self, listing: &Listing) -> Result<Listing, AppError> {
        sqlx::query_as::<_, Listing>(
            "INSERT INTO listings (id, title, description, listing_type, city, country, price, currency, available_stock, max_guests, images, amenities, host_id, rating, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&listing.id).bind(&listing.title).bind(&listing.description).bind(&listing.listing_type)
            .bind(&listing.city).bind(&listing.country).bind(listing.price).bind(&listing.currency)
            .bind(listing.available_stock).bind(listing.max_guests).bind(&listing.images).bind(&listing.amenities)
            .bind(&listing.host_id).bind(listing.rating).bind(listing.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, AppError> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM listings WHERE 1=1");
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
            "UPDATE listings SET title=?, description=?, listing_type=?, city=?, country=?, price=?, currency=?, available_stock=?, max_guests=?, images=?, amenities=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&listing.title).bind(&listing.description).bind(&listing.listing_type)
            .bind(&listing.city).bind(&listing.country).bind(listing.price).bind(&listing.currency)
            .bind(listing.available_stock).bind(listing.max_guests).bind(&listing.images).bind(&listing.amenities)
            .bind(&listing.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Package not found".into())); }
        Ok(())
    }
}
