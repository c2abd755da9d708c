//! PostgreSQL-backed [`BookingStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use lendhub_core::booking::{Booking, BookingStatus, NewBooking};
use lendhub_core::error::CoreError;
use lendhub_core::store::BookingStore;
use lendhub_core::types::DbId;

use crate::models::booking::BookingRow;
use crate::repositories::map_sqlx_err;

/// Column list for `bookings` queries.
const BOOKING_COLUMNS: &str = "id, start_date, end_date, status, booker_id, item_id";

/// Same columns qualified for joins against `items`.
const BOOKING_COLUMNS_QUALIFIED: &str =
    "b.id, b.start_date, b.end_date, b.status, b.booker_id, b.item_id";

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_domain(rows: Vec<BookingRow>) -> Result<Vec<Booking>, CoreError> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking, CoreError> {
        let query = format!(
            "INSERT INTO bookings (start_date, end_date, status, booker_id, item_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {BOOKING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(booking.start)
            .bind(booking.end)
            .bind(BookingStatus::Waiting.as_str())
            .bind(booking.booker_id)
            .bind(booking.item_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, CoreError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.map(Booking::try_from).transpose()
    }

    async fn update_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, CoreError> {
        let query = format!(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.map(Booking::try_from).transpose()
    }

    async fn list_by_booker(&self, booker_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE booker_id = $1
             ORDER BY start_date DESC"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(booker_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        into_domain(rows)
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS_QUALIFIED} FROM bookings b
             JOIN items i ON i.id = b.item_id
             WHERE i.owner_id = $1
             ORDER BY b.start_date DESC"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        into_domain(rows)
    }

    async fn list_approved_for_item(&self, item_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE item_id = $1 AND status = $2
             ORDER BY start_date ASC"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(item_id)
            .bind(BookingStatus::Approved.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        into_domain(rows)
    }
}
