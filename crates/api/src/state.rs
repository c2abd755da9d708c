use std::sync::Arc;

use lendhub_core::engine::BookingEngine;
use lendhub_core::index::AvailabilityIndex;
use lendhub_core::store::{ItemStore, UserStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (everything is behind `Arc`). The booking store is
/// reachable only through the engine; user and item handlers talk to their
/// stores directly.
#[derive(Clone)]
pub struct AppState {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Item persistence.
    pub items: Arc<dyn ItemStore>,
    /// Booking scheduling and conflict-resolution engine.
    pub engine: Arc<BookingEngine>,
    /// Derived search index over available items.
    pub index: Arc<AvailabilityIndex>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
