use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking, decrement_stock: bool) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if decrement_stock {
            // Conditional decrement: never drops below zero, and a racing
            // request against the last unit sees zero rows affected.
            let result = sqlx::query(
                "UPDATE listings SET available_stock = available_stock - 1 WHERE id = ? AND available_stock >= 1"
            )
                .bind(&booking.listing_id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
            if result.rows_affected() == 0 {
                return Err(AppError::InsufficientInventory("No availability for selected dates".to_string()));
            }
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, account_id, listing_id, booking_reference, payment_id, check_in, check_out, adults, children, infants, guest_first_name, guest_last_name, guest_email, guest_phone, guest_country, special_requests, base_price, total_price, currency, payment_status, payment_method, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.account_id).bind(&booking.listing_id)
            .bind(&booking.booking_reference).bind(&booking.payment_id)
            .bind(booking.check_in).bind(booking.check_out)
            .bind(booking.guests.adults).bind(booking.guests.children).bind(booking.guests.infants)
            .bind(&booking.primary_guest.first_name).bind(&booking.primary_guest.last_name)
            .bind(&booking.primary_guest.email).bind(&booking.primary_guest.phone).bind(&booking.primary_guest.country)
            .bind(&booking.special_requests).bind(booking.base_price).bind(booking.total_price).bind(&booking.currency)
            .bind(&booking.payment_status).bind(&booking.payment_method).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE account_id = ? ORDER BY created_at DESC").bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn cancel(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancelled_at = ?, cancelled_by = ?, cancellation_reason = ? WHERE id = ? RETURNING *"
        )
            .bind(Utc::now()).bind(&booking.cancelled_by).bind(&booking.cancellation_reason)
            .bind(&booking.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
