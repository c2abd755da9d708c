//! Domain core for the LendHub item-sharing platform.
//!
//! This crate holds the booking scheduling and conflict-resolution engine
//! plus the storage seams it runs on. It has no web or database
//! dependencies so the same logic drives the PostgreSQL backend in
//! `lendhub-db`, the in-memory backend used by tests and dev mode, and any
//! future CLI tooling.

pub mod booking;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod index;
pub mod item;
pub mod store;
pub mod types;
pub mod user;
