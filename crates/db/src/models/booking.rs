use lendhub_core::booking::{Booking, BookingStatus};
use lendhub_core::error::CoreError;
use lendhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// Status is stored as TEXT (`WAITING` / `APPROVED` / `REJECTED`, enforced
/// by a CHECK constraint); conversion into the domain enum is fallible only
/// if the constraint were ever violated.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
    pub booker_id: DbId,
    pub item_id: DbId,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(|e: String| CoreError::Internal(format!("booking {}: {e}", row.id)))?;
        Ok(Booking {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            status,
            booker_id: row.booker_id,
            item_id: row.item_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn row(status: &str) -> BookingRow {
        let now = Utc::now();
        BookingRow {
            id: 1,
            start_date: now,
            end_date: now + Duration::hours(1),
            status: status.to_string(),
            booker_id: 2,
            item_id: 3,
        }
    }

    #[test]
    fn known_statuses_convert() {
        for (text, status) in [
            ("WAITING", BookingStatus::Waiting),
            ("APPROVED", BookingStatus::Approved),
            ("REJECTED", BookingStatus::Rejected),
        ] {
            let booking = Booking::try_from(row(text)).unwrap();
            assert_eq!(booking.status, status);
        }
    }

    #[test]
    fn unknown_status_is_an_internal_error() {
        let err = Booking::try_from(row("CANCELLED")).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }
}
