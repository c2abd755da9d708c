//! Booking lifecycle engine.
//!
//! Orchestrates authorization and business rules around booking creation,
//! adjudication and listing. Every operation runs to completion within the
//! scope of one inbound call; there are no background tasks or timers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use crate::booking::{Booking, BookingState, BookingStatus, NewBooking, Role};
use crate::conflict::find_conflict;
use crate::error::CoreError;
use crate::store::{BookingStore, ItemStore, UserStore};
use crate::types::{DbId, Timestamp};

/// The scheduling and conflict-resolution orchestrator.
///
/// Holds the store seams plus a map of per-item approval locks. The locks
/// serialize the WAITING -> APPROVED transition per item, so the conflict
/// check can be re-run race-free right before committing an approval (two
/// overlapping WAITING bookings may both exist; only one may ever become
/// APPROVED).
pub struct BookingEngine {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
    bookings: Arc<dyn BookingStore>,
    approval_locks: Mutex<HashMap<DbId, Arc<AsyncMutex<()>>>>,
}

impl BookingEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            users,
            items,
            bookings,
            approval_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Request a booking of `item_id` over `[start, end)` for `booker_id`.
    ///
    /// Guard sequence:
    /// 1. booker must exist;
    /// 2. item must exist;
    /// 3. the owner may not book their own item (disguised as not-found);
    /// 4. the item must be available;
    /// 5. the interval must not overlap an APPROVED booking of the item.
    ///
    /// The surviving request is persisted as WAITING. `start < end` is the
    /// caller's responsibility (validated upstream).
    pub async fn create_booking(
        &self,
        item_id: DbId,
        booker_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Booking, CoreError> {
        self.users
            .find_by_id(booker_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: booker_id,
            })?;

        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: item_id,
            })?;

        if item.owner_id == booker_id {
            // Booking one's own item is disguised as absence.
            return Err(CoreError::NotFound {
                entity: "Item",
                id: item_id,
            });
        }

        if !item.available {
            return Err(CoreError::NotAvailable { item_id });
        }

        let approved = self.bookings.list_approved_for_item(item_id).await?;
        if let Some(blocking) = find_conflict(&approved, start, end) {
            return Err(CoreError::DatesIntersect {
                start: blocking.start,
                end: blocking.end,
            });
        }

        let booking = self
            .bookings
            .create(NewBooking {
                item_id,
                booker_id,
                start,
                end,
            })
            .await?;

        tracing::info!(
            booking_id = booking.id,
            item_id,
            booker_id,
            "booking created, waiting for adjudication"
        );
        Ok(booking)
    }

    /// Approve or reject a WAITING booking.
    ///
    /// Guard sequence:
    /// 1. booking must exist;
    /// 2. the booker may not adjudicate their own request (disguised as
    ///    not-found);
    /// 3. only the item owner may adjudicate;
    /// 4. terminal statuses (APPROVED and REJECTED alike) admit no further
    ///    transition.
    ///
    /// Approvals additionally run inside a per-item critical section and
    /// re-check both the status and the conflict invariant before
    /// committing, so two concurrent approvals of overlapping WAITING
    /// bookings cannot both land.
    pub async fn update_status(
        &self,
        booking_id: DbId,
        acting_user_id: DbId,
        approve: bool,
    ) -> Result<Booking, CoreError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;

        if booking.booker_id == acting_user_id {
            return Err(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            });
        }

        let item = self
            .items
            .find_by_id(booking.item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: booking.item_id,
            })?;

        if item.owner_id != acting_user_id {
            return Err(CoreError::CannotUpdateStatus(
                "only the item owner may approve or reject a booking".to_string(),
            ));
        }

        if booking.status.is_terminal() {
            return Err(CoreError::CannotUpdateStatus(format!(
                "booking {booking_id} is already {}",
                booking.status
            )));
        }

        if !approve {
            return self.commit_status(booking_id, BookingStatus::Rejected).await;
        }

        let lock = self.approval_lock(booking.item_id);
        let _guard = lock.lock().await;

        // Re-read under the item lock: a concurrent call may have
        // adjudicated this booking, or approved an overlapping one.
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;
        if booking.status.is_terminal() {
            return Err(CoreError::CannotUpdateStatus(format!(
                "booking {booking_id} is already {}",
                booking.status
            )));
        }

        let approved = self.bookings.list_approved_for_item(booking.item_id).await?;
        if let Some(blocking) = find_conflict(&approved, booking.start, booking.end) {
            return Err(CoreError::DatesIntersect {
                start: blocking.start,
                end: blocking.end,
            });
        }

        self.commit_status(booking_id, BookingStatus::Approved).await
    }

    /// Return the booking iff `user_id` is its booker or the owner of its
    /// item. Anyone else gets not-found, never forbidden: unrelated users
    /// must not learn the booking exists.
    pub async fn get_for_user(
        &self,
        booking_id: DbId,
        user_id: DbId,
    ) -> Result<Booking, CoreError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;

        let item = self
            .items
            .find_by_id(booking.item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: booking.item_id,
            })?;

        if booking.booker_id != user_id && item.owner_id != user_id {
            return Err(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            });
        }

        Ok(booking)
    }

    /// List bookings of `subject_id` (as booker or as item owner) in the
    /// given state bucket, ordered by start descending, sliced to
    /// `[from, from + size)`. An offset past the end of the filtered
    /// sequence yields an empty list, never an error.
    pub async fn list_by_state(
        &self,
        state: BookingState,
        subject_id: DbId,
        from: usize,
        size: usize,
        role: Role,
    ) -> Result<Vec<Booking>, CoreError> {
        self.users
            .find_by_id(subject_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: subject_id,
            })?;

        let bookings = match role {
            Role::Booker => self.bookings.list_by_booker(subject_id).await?,
            Role::Owner => self.bookings.list_by_owner(subject_id).await?,
        };

        let now = Utc::now();
        Ok(bookings
            .into_iter()
            .filter(|b| state.matches(b, now))
            .skip(from)
            .take(size)
            .collect())
    }

    fn approval_lock(&self, item_id: DbId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .approval_locks
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(item_id).or_default())
    }

    async fn commit_status(
        &self,
        booking_id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, CoreError> {
        let booking = self
            .bookings
            .update_status(booking_id, status)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;
        tracing::info!(booking_id, status = %status, "booking status updated");
        Ok(booking)
    }
}
