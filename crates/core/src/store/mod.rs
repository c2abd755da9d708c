//! Storage seams for users, items and bookings.
//!
//! The engine and the HTTP layer only ever talk to these traits. The
//! backing store is assumed transactional; `lendhub-db` implements the
//! traits over PostgreSQL, while [`MemoryStore`] provides the in-process
//! backend used by tests and dev mode.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::booking::{Booking, BookingStatus, NewBooking};
use crate::error::CoreError;
use crate::item::{Item, ItemPatch, NewItem};
use crate::types::DbId;
use crate::user::{NewUser, User, UserPatch};

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Duplicate email fails with [`CoreError::Conflict`].
    async fn create(&self, user: NewUser) -> Result<User, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// All users, ordered by id ascending.
    async fn list(&self) -> Result<Vec<User>, CoreError>;

    /// Patch a user; `None` when absent. Duplicate email fails with
    /// [`CoreError::Conflict`].
    async fn update(&self, id: DbId, patch: UserPatch) -> Result<Option<User>, CoreError>;

    /// Delete a user; `false` when absent.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Item persistence.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create(&self, owner_id: DbId, item: NewItem) -> Result<Item, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, CoreError>;

    /// Items owned by `owner_id`, ordered by id ascending.
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Item>, CoreError>;

    /// Every item, ordered by id ascending. Used to rebuild the
    /// availability index on cold start.
    async fn list_all(&self) -> Result<Vec<Item>, CoreError>;

    /// Patch an item; `None` when absent.
    async fn update(&self, id: DbId, patch: ItemPatch) -> Result<Option<Item>, CoreError>;

    /// Delete an item together with its bookings; `false` when absent.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Booking persistence.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking with status WAITING.
    async fn create(&self, booking: NewBooking) -> Result<Booking, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, CoreError>;

    /// Set the status of a booking; `None` when absent.
    async fn update_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, CoreError>;

    /// Bookings made by `booker_id`, ordered by start descending.
    async fn list_by_booker(&self, booker_id: DbId) -> Result<Vec<Booking>, CoreError>;

    /// Bookings on items owned by `owner_id`, ordered by start descending.
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Booking>, CoreError>;

    /// APPROVED bookings of one item, ordered by start ascending. This is
    /// the conflict detector's input.
    async fn list_approved_for_item(&self, item_id: DbId) -> Result<Vec<Booking>, CoreError>;
}
