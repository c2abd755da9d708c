//! Booking domain types: status state machine, listing state filters and
//! the subject role for listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking.
///
/// `Waiting` is set at creation time and only at creation time. The only
/// transitions are Waiting -> Approved and Waiting -> Rejected; both target
/// states are terminal, regardless of actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Whether no further transition is permitted out of this status.
    ///
    /// Covers both Approved and Rejected. The terminal guard is applied
    /// uniformly: re-rejecting a rejected booking is refused just like
    /// re-approving an approved one.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Canonical wire/storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing state filter
// ---------------------------------------------------------------------------

/// Temporal/state bucket used when listing bookings.
///
/// `All`, `Waiting` and `Rejected` select on the status field; `Current`,
/// `Past` and `Future` select on the interval relative to "now". The three
/// temporal buckets partition `All`: every booking falls in exactly one of
/// them for a fixed evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Waiting,
    Rejected,
    Current,
    Past,
    Future,
}

impl BookingState {
    /// Parse a raw state token. Tokens are exact-match uppercase; anything
    /// else fails with [`CoreError::UnsupportedState`] carrying the raw
    /// string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "ALL" => Ok(Self::All),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            other => Err(CoreError::UnsupportedState(other.to_string())),
        }
    }

    /// Evaluate the bucket predicate for one booking against `now`.
    pub fn matches(self, booking: &Booking, now: Timestamp) -> bool {
        match self {
            Self::All => true,
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
            Self::Current => booking.start <= now && now < booking.end,
            Self::Past => booking.end < now,
            Self::Future => now < booking.start,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing role
// ---------------------------------------------------------------------------

/// Whose bookings a listing request is about: the requesting user as
/// booker, or as owner of the booked items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Booker,
    Owner,
}

// ---------------------------------------------------------------------------
// Booking records
// ---------------------------------------------------------------------------

/// A persisted booking. Ties exactly one item to one booker for one
/// interval. `start < end` is guaranteed upstream before a booking reaches
/// this crate; the core does not re-validate interval ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub status: BookingStatus,
    pub booker_id: DbId,
    pub item_id: DbId,
}

/// Data for a booking about to be persisted. Status is not part of it:
/// every new booking starts out `Waiting`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub item_id: DbId,
    pub booker_id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
}
