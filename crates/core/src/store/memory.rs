//! In-memory store backend.
//!
//! One struct implements all three store traits over mutex-guarded maps,
//! with sequential i64 ids mirroring BIGSERIAL. Backs the core unit tests,
//! the API integration tests and the `DEV_MEMORY_STORE` dev mode; it is not
//! durable and never the system of record in production.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::booking::{Booking, BookingStatus, NewBooking};
use crate::error::CoreError;
use crate::item::{Item, ItemPatch, NewItem};
use crate::store::{BookingStore, ItemStore, UserStore};
use crate::types::DbId;
use crate::user::{NewUser, User, UserPatch};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<DbId, User>,
    items: BTreeMap<DbId, Item>,
    bookings: BTreeMap<DbId, Booking>,
    next_user_id: DbId,
    next_item_id: DbId,
    next_booking_id: DbId,
}

/// Shared in-memory backend for all three aggregates.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test thread; the data is
        // still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn email_taken(inner: &Inner, email: &str, exclude: Option<DbId>) -> bool {
    inner
        .users
        .values()
        .any(|u| u.email == email && Some(u.id) != exclude)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, CoreError> {
        let mut inner = self.lock();
        if email_taken(&inner, &user.email, None) {
            return Err(CoreError::Conflict(format!(
                "email already in use: {}",
                user.email
            )));
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let user = User {
            id,
            name: user.name,
            email: user.email,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn update(&self, id: DbId, patch: UserPatch) -> Result<Option<User>, CoreError> {
        let mut inner = self.lock();
        if let Some(email) = &patch.email {
            if email_taken(&inner, email, Some(id)) {
                return Err(CoreError::Conflict(format!("email already in use: {email}")));
            }
        }
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.lock().users.remove(&id).is_some())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn create(&self, owner_id: DbId, item: NewItem) -> Result<Item, CoreError> {
        let mut inner = self.lock();
        inner.next_item_id += 1;
        let id = inner.next_item_id;
        let item = Item {
            id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id,
        };
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, CoreError> {
        Ok(self.lock().items.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Item>, CoreError> {
        Ok(self
            .lock()
            .items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Item>, CoreError> {
        Ok(self.lock().items.values().cloned().collect())
    }

    async fn update(&self, id: DbId, patch: ItemPatch) -> Result<Option<Item>, CoreError> {
        let mut inner = self.lock();
        let Some(item) = inner.items.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(item);
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut inner = self.lock();
        if inner.items.remove(&id).is_none() {
            return Ok(false);
        }
        // Bookings are tied to exactly one item; they go with it.
        inner.bookings.retain(|_, b| b.item_id != id);
        Ok(true)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create(&self, booking: NewBooking) -> Result<Booking, CoreError> {
        let mut inner = self.lock();
        inner.next_booking_id += 1;
        let id = inner.next_booking_id;
        let booking = Booking {
            id,
            start: booking.start,
            end: booking.end,
            status: BookingStatus::Waiting,
            booker_id: booking.booker_id,
            item_id: booking.item_id,
        };
        inner.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, CoreError> {
        Ok(self.lock().bookings.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, CoreError> {
        let mut inner = self.lock();
        let Some(booking) = inner.bookings.get_mut(&id) else {
            return Ok(None);
        };
        booking.status = status;
        Ok(Some(booking.clone()))
    }

    async fn list_by_booker(&self, booker_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let inner = self.lock();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.booker_id == booker_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(bookings)
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let inner = self.lock();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| {
                inner
                    .items
                    .get(&b.item_id)
                    .is_some_and(|i| i.owner_id == owner_id)
            })
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(bookings)
    }

    async fn list_approved_for_item(&self, item_id: DbId) -> Result<Vec<Booking>, CoreError> {
        let inner = self.lock();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.item_id == item_id && b.status == BookingStatus::Approved)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn new_item(available: bool) -> NewItem {
        NewItem {
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_aggregate() {
        let store = MemoryStore::new();
        let u1 = UserStore::create(&store, new_user("a", "a@example.com"))
            .await
            .unwrap();
        let u2 = UserStore::create(&store, new_user("b", "b@example.com"))
            .await
            .unwrap();
        let i1 = ItemStore::create(&store, u1.id, new_item(true)).await.unwrap();
        assert_eq!((u1.id, u2.id, i1.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("a", "a@example.com"))
            .await
            .unwrap();
        let err = UserStore::create(&store, new_user("b", "a@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[tokio::test]
    async fn patching_to_own_email_is_allowed() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("a", "a@example.com"))
            .await
            .unwrap();
        let patch = UserPatch {
            name: Some("renamed".to_string()),
            email: Some("a@example.com".to_string()),
        };
        let updated = UserStore::update(&store, user.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "renamed");
    }

    #[tokio::test]
    async fn booker_listing_is_start_descending() {
        let store = MemoryStore::new();
        let owner = UserStore::create(&store, new_user("o", "o@example.com"))
            .await
            .unwrap();
        let item = ItemStore::create(&store, owner.id, new_item(true)).await.unwrap();
        let now = Utc::now();
        for offset in [5, 1, 3] {
            BookingStore::create(
                &store,
                NewBooking {
                    item_id: item.id,
                    booker_id: 42,
                    start: now + Duration::hours(offset),
                    end: now + Duration::hours(offset + 1),
                },
            )
            .await
            .unwrap();
        }
        let listed = store.list_by_booker(42).await.unwrap();
        let starts: Vec<_> = listed.iter().map(|b| b.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(starts, sorted);
    }

    #[tokio::test]
    async fn approved_listing_filters_and_sorts_ascending() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let b1 = BookingStore::create(
            &store,
            NewBooking {
                item_id: 1,
                booker_id: 2,
                start: now + Duration::hours(4),
                end: now + Duration::hours(5),
            },
        )
        .await
        .unwrap();
        let b2 = BookingStore::create(
            &store,
            NewBooking {
                item_id: 1,
                booker_id: 2,
                start: now + Duration::hours(1),
                end: now + Duration::hours(2),
            },
        )
        .await
        .unwrap();
        store
            .update_status(b1.id, BookingStatus::Approved)
            .await
            .unwrap();
        store
            .update_status(b2.id, BookingStatus::Approved)
            .await
            .unwrap();

        let approved = store.list_approved_for_item(1).await.unwrap();
        assert_eq!(approved.len(), 2);
        assert!(approved[0].start < approved[1].start);
    }

    #[tokio::test]
    async fn deleting_an_item_drops_its_bookings() {
        let store = MemoryStore::new();
        let owner = UserStore::create(&store, new_user("o", "o@example.com"))
            .await
            .unwrap();
        let item = ItemStore::create(&store, owner.id, new_item(true)).await.unwrap();
        let now = Utc::now();
        let booking = BookingStore::create(
            &store,
            NewBooking {
                item_id: item.id,
                booker_id: 42,
                start: now,
                end: now + Duration::hours(1),
            },
        )
        .await
        .unwrap();

        assert!(ItemStore::delete(&store, item.id).await.unwrap());
        assert!(BookingStore::find_by_id(&store, booking.id)
            .await
            .unwrap()
            .is_none());
    }
}
