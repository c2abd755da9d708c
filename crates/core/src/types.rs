/// All primary keys are 64-bit integers (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// All instants are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
