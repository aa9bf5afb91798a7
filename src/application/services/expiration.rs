//! Expiration sweep
//!
//! Background task that reclaims pending bookings abandoned past the
//! payment timeout. Each expired booking goes through the same
//! system cancellation path used by interactive cancellation, in its
//! own repository call, so one bad record never halts the batch.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use log::{debug, info, warn};

use crate::domain::{BookingRepository, BookingStatus, Clock, DomainError, DomainResult};
use crate::shared::shutdown::ShutdownSignal;

use super::booking::{ActorRef, BookingService};

/// Configuration for the expiration sweep.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to look for stale pending bookings (in seconds)
    pub check_interval_secs: u64,
    /// How long a booking may remain pending (in minutes)
    pub pending_timeout_minutes: i64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            pending_timeout_minutes: 30,
        }
    }
}

/// Outcome of a single sweep run.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Bookings successfully cancelled
    pub processed: usize,
    /// Per-booking failures, reported instead of thrown
    pub errors: Vec<String>,
}

/// Periodic job cancelling stale pending bookings.
pub struct ExpirationSweeper {
    service: Arc<BookingService>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
}

impl ExpirationSweeper {
    pub fn new(
        service: Arc<BookingService>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            service,
            bookings,
            clock,
            config: SweeperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SweeperConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the background sweep loop.
    pub fn start(self: &Arc<Self>, shutdown: ShutdownSignal) {
        let sweeper = self.clone();

        tokio::spawn(async move {
            info!(
                "expiration sweeper started (interval: {}s, timeout: {}min)",
                sweeper.config.check_interval_secs, sweeper.config.pending_timeout_minutes
            );

            let mut interval = tokio::time::interval(StdDuration::from_secs(
                sweeper.config.check_interval_secs,
            ));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match sweeper.sweep_once().await {
                            Ok(report) if report.processed > 0 || !report.errors.is_empty() => {
                                info!(
                                    "expiration sweep: {} cancelled, {} failed",
                                    report.processed,
                                    report.errors.len()
                                );
                            }
                            Ok(_) => {}
                            Err(e) => warn!("expiration sweep failed: {}", e),
                        }
                    }
                    _ = shutdown.wait() => {
                        info!("expiration sweeper shutting down");
                        break;
                    }
                }
            }
        });
    }

    /// One sweep pass: fetch stale pending bookings, cancel each
    /// independently.
    ///
    /// Idempotent: a booking that left `Pending` between fetch and
    /// act is skipped. The state machine rejects the transition on a
    /// re-read, and the repository rejects the write when the status
    /// changed underneath it. Neither is an error.
    pub async fn sweep_once(&self) -> DomainResult<SweepReport> {
        let cutoff = self.clock.now() - Duration::minutes(self.config.pending_timeout_minutes);
        let expired = self.bookings.find_expired_pending(cutoff).await?;

        if expired.is_empty() {
            debug!("no expired pending bookings found");
            return Ok(SweepReport::default());
        }

        let mut report = SweepReport::default();
        for booking in expired {
            match self
                .service
                .transition(booking.id, ActorRef::System, BookingStatus::Cancelled, None)
                .await
            {
                Ok(_) => report.processed += 1,
                Err(DomainError::InvalidTransition { .. }) | Err(DomainError::Conflict(_)) => {
                    debug!("booking {} already left Pending, skipping", booking.code);
                }
                Err(e) => {
                    warn!("failed to expire booking {}: {}", booking.code, e);
                    report.errors.push(format!("{}: {}", booking.code, e));
                }
            }
        }

        Ok(report)
    }
}

// ── Tests ──────────────────────────────────────────────────────
