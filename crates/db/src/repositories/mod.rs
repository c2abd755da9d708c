//! Store trait implementations over PostgreSQL.
//!
//! Each repository holds a pool clone and implements one `lendhub-core`
//! store trait, so handlers and the engine stay storage-agnostic.

pub mod booking_repo;
pub mod item_repo;
pub mod user_repo;

pub use booking_repo::PgBookingStore;
pub use item_repo::PgItemStore;
pub use user_repo::PgUserStore;

use lendhub_core::error::CoreError;

/// Map a sqlx error onto the domain taxonomy.
///
/// Unique violations on `uq_`-prefixed constraints (PostgreSQL error code
/// 23505) become [`CoreError::Conflict`]; everything else is logged and
/// surfaced as [`CoreError::Internal`] with a sanitized message.
pub(crate) fn map_sqlx_err(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "database error");
    CoreError::Internal("database error".to_string())
}
