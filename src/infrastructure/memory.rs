//! In-memory storage implementation
//!
//! Backs all repository traits for development and tests. Guarded
//! booking writes take a single async mutex so the availability
//! recheck and the write happen without interleaving, mirroring the
//! transactional guard in the SeaORM repository.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::availability;
use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::calendar::{AvailabilityCalendarRepository, CalendarOverride};
use crate::domain::homestay::{Homestay, HomestayRepository};
use crate::domain::user::{User, UserDirectory};
use crate::domain::{DomainError, DomainResult};

const UNAVAILABLE_MSG: &str = "Homestay is not available for the selected dates.";

/// In-memory store for development and testing
pub struct InMemoryStore {
    users: DashMap<i64, User>,
    homestays: DashMap<i64, Homestay>,
    overrides: DashMap<(i64, NaiveDate), CalendarOverride>,
    bookings: DashMap<i64, Booking>,
    booking_counter: AtomicI64,
    override_counter: AtomicI64,
    write_guard: Mutex<()>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            homestays: DashMap::new(),
            overrides: DashMap::new(),
            bookings: DashMap::new(),
            booking_counter: AtomicI64::new(1),
            override_counter: AtomicI64::new(1),
            write_guard: Mutex::new(()),
        }
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_homestay(&self, homestay: Homestay) {
        self.homestays.insert(homestay.id, homestay);
    }

    pub fn insert_override(&self, entry: CalendarOverride) {
        self.overrides
            .insert((entry.homestay_id, entry.date), entry);
    }

    fn check_range(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<i64>,
    ) -> bool {
        let Some(stay) = self.homestays.get(&homestay_id) else {
            return false;
        };

        let existing: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().homestay_id == homestay_id)
            .map(|e| e.value().clone())
            .collect();

        let overrides: Vec<CalendarOverride> = self
            .overrides
            .iter()
            .filter(|e| e.value().homestay_id == homestay_id)
            .map(|e| e.value().clone())
            .collect();

        availability::is_range_available(
            stay.value(),
            &existing,
            &overrides,
            check_in,
            check_out,
            exclude,
        )
    }

    fn check_current_status(&self, id: i64, expected: BookingStatus) -> DomainResult<()> {
        let Some(current) = self.bookings.get(&id) else {
            return Err(DomainError::not_found("Booking", "id", id));
        };
        if current.value().status != expected {
            return Err(DomainError::Conflict(format!(
                "Booking is no longer {}.",
                expected
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl HomestayRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Homestay>> {
        Ok(self.homestays.get(&id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl AvailabilityCalendarRepository for InMemoryStore {
    async fn find_in_range(
        &self,
        homestay_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarOverride>> {
        let mut rows: Vec<CalendarOverride> = self
            .overrides
            .iter()
            .filter(|e| {
                let o = e.value();
                o.homestay_id == homestay_id && !o.is_deleted && o.date >= from && o.date < to
            })
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|o| o.date);
        Ok(rows)
    }

    async fn upsert(&self, mut entry: CalendarOverride) -> DomainResult<CalendarOverride> {
        let key = (entry.homestay_id, entry.date);
        match self.overrides.get(&key) {
            Some(existing) => entry.id = existing.value().id,
            None => entry.id = self.override_counter.fetch_add(1, Ordering::SeqCst),
        }
        entry.is_deleted = false;
        self.overrides.insert(key, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, homestay_id: i64, date: NaiveDate) -> DomainResult<()> {
        if let Some(mut entry) = self.overrides.get_mut(&(homestay_id, date)) {
            entry.is_deleted = true;
            entry.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|e| e.value().code == code)
            .map(|e| e.value().clone()))
    }

    async fn find_overlapping_active(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let mut rows: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.homestay_id == homestay_id
                    && b.status.holds_dates()
                    && availability::ranges_overlap(b.check_in, b.check_out, check_in, check_out)
            })
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|b| b.check_in);
        Ok(rows)
    }

    async fn insert_guarded(&self, mut booking: Booking) -> DomainResult<Booking> {
        let _guard = self.write_guard.lock().await;

        if !self.check_range(booking.homestay_id, booking.check_in, booking.check_out, None) {
            return Err(DomainError::Conflict(UNAVAILABLE_MSG.to_string()));
        }

        booking.id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_guarded(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> DomainResult<Booking> {
        let _guard = self.write_guard.lock().await;

        self.check_current_status(booking.id, expected_status)?;

        if !self.check_range(
            booking.homestay_id,
            booking.check_in,
            booking.check_out,
            Some(booking.id),
        ) {
            return Err(DomainError::Conflict(UNAVAILABLE_MSG.to_string()));
        }

        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> DomainResult<Booking> {
        let _guard = self.write_guard.lock().await;

        self.check_current_status(booking.id, expected_status)?;
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_expired_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        let mut rows: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.status == BookingStatus::Pending && b.created_at <= cutoff
            })
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|b| b.created_at);
        Ok(rows)
    }
}
