//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! User and item handlers delegate to the stores; booking handlers go
//! through the [`BookingEngine`](lendhub_core::engine::BookingEngine).
//! Errors are mapped via [`AppError`](crate::error::AppError).

pub mod bookings;
pub mod items;
pub mod users;
