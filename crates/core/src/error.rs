use crate::types::{DbId, Timestamp};

/// Domain error taxonomy.
///
/// Every variant is a typed, recoverable failure surfaced to the caller;
/// nothing is swallowed and nothing is retried internally. The API layer
/// maps these onto HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist -- or access to it is
    /// deliberately disguised as absence (e.g. an unrelated user asking
    /// for somebody else's booking).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The item's availability flag is off; it cannot be booked.
    #[error("Item {item_id} is not available for booking")]
    NotAvailable { item_id: DbId },

    /// The candidate interval overlaps an approved booking on the same
    /// item. Carries the conflicting interval for diagnostics.
    #[error("Requested dates intersect an approved booking ({start} .. {end})")]
    DatesIntersect { start: Timestamp, end: Timestamp },

    /// Authorization or terminal-state violation on a status update.
    #[error("Cannot update booking status: {0}")]
    CannotUpdateStatus(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A listing request carried a state token outside the supported set.
    /// Carries the offending raw string.
    #[error("Unknown state: {0}")]
    UnsupportedState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate user email).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
