use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lendhub_core::engine::BookingEngine;
use lendhub_core::index::AvailabilityIndex;
use lendhub_core::store::{BookingStore, ItemStore, MemoryStore, UserStore};

use lendhub_api::config::ServerConfig;
use lendhub_api::router::build_app_router;
use lendhub_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lendhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Stores ---
    let (users, items, bookings) = build_stores().await;

    // --- Availability index (rebuilt from the item store on every boot) ---
    let index = Arc::new(AvailabilityIndex::new());
    let snapshot = items
        .list_all()
        .await
        .expect("Failed to load items for index rebuild");
    index.rebuild(&snapshot);

    // --- Engine ---
    let engine = Arc::new(BookingEngine::new(
        Arc::clone(&users),
        Arc::clone(&items),
        bookings,
    ));

    let state = AppState {
        users,
        items,
        engine,
        index,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "LendHub API listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Build the store backends.
///
/// With `DEV_MEMORY_STORE=1` everything runs on the in-memory backend (no
/// database needed; state is lost on restart). Otherwise `DATABASE_URL`
/// must point at PostgreSQL; migrations run on boot.
async fn build_stores() -> (Arc<dyn UserStore>, Arc<dyn ItemStore>, Arc<dyn BookingStore>) {
    if std::env::var("DEV_MEMORY_STORE").as_deref() == Ok("1") {
        tracing::warn!("Running on the in-memory store; data will not survive a restart");
        let store = Arc::new(MemoryStore::new());
        return (store.clone(), store.clone(), store);
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = lendhub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    lendhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    lendhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    (
        Arc::new(lendhub_db::PgUserStore::new(pool.clone())),
        Arc::new(lendhub_db::PgItemStore::new(pool.clone())),
        Arc::new(lendhub_db::PgBookingStore::new(pool)),
    )
}
