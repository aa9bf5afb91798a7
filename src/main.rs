//!
//! Homestay booking reservation engine.
//! Reads configuration from TOML file (~/.config/homestay-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use homestay_booking::application::ports::{LogNotifier, LogPaymentGateway};
use homestay_booking::application::services::{BookingService, ExpirationSweeper, SweeperConfig};
use homestay_booking::config::AppConfig;
use homestay_booking::domain::SystemClock;
use homestay_booking::infrastructure::database::migrator::Migrator;
use homestay_booking::infrastructure::database::repositories::{
    SeaOrmBookingRepository, SeaOrmCalendarRepository, SeaOrmHomestayRepository,
    SeaOrmUserDirectory,
};
use homestay_booking::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use homestay_booking::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Homestay Booking Engine...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let homestays = Arc::new(SeaOrmHomestayRepository::new(db.clone()));
    let calendar = Arc::new(SeaOrmCalendarRepository::new(db.clone()));
    let bookings = Arc::new(SeaOrmBookingRepository::new(db.clone()));
    let users = Arc::new(SeaOrmUserDirectory::new(db.clone()));
    let clock = Arc::new(SystemClock);

    let service = Arc::new(BookingService::new(
        homestays,
        calendar,
        bookings.clone(),
        users,
        Arc::new(LogNotifier),
        Arc::new(LogPaymentGateway),
        clock.clone(),
        app_cfg.booking.fee_rates(),
    ));

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── Expiration sweeper ─────────────────────────────────────
    let sweeper = Arc::new(
        ExpirationSweeper::new(service.clone(), bookings, clock).with_config(SweeperConfig {
            check_interval_secs: app_cfg.booking.sweep_interval_secs,
            pending_timeout_minutes: app_cfg.booking.pending_timeout_minutes,
        }),
    );
    sweeper.start(shutdown.clone());

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(service);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Homestay Booking Engine shutdown complete");
    Ok(())
}
