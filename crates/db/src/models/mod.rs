//! Row structs.
//!
//! Each submodule holds a `FromRow` struct matching the table layout plus
//! its conversion into the corresponding `lendhub-core` domain type. The
//! domain types themselves never derive sqlx traits; the core crate stays
//! free of database dependencies.

pub mod booking;
pub mod item;
pub mod user;
