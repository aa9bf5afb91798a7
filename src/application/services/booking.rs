//! Booking use-case orchestration
//!
//! [`BookingService`] drives the engine: it consults the availability
//! decision and the pricing calculator before the state machine, then
//! persists through the guarded repository operations. The repository
//! re-validates availability atomically, so passing the pre-check here
//! never guarantees the insert; a lost race surfaces as `Conflict`.

use std::sync::Arc;

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;

use crate::domain::booking::lifecycle::{self, TransitionContext};
use crate::domain::booking::{generate_booking_code, Booking, BookingStatus, GuestCounts};
use crate::domain::{
    availability, pricing, AvailabilityCalendarRepository, BookingRepository, CalendarOverride,
    Clock, DomainError, DomainResult, FeeRates, Homestay, HomestayRepository, PriceBreakdown,
    User, UserDirectory, UserRole,
};

use super::super::ports::{NotificationPort, PaymentPort};

/// Who is asking for an operation. Roles are resolved from the user
/// directory, never trusted from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRef {
    System,
    User(i64),
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub homestay_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
    pub special_requests: Option<String>,
}

/// Desired state of one calendar-override date.
#[derive(Debug, Clone, Default)]
pub struct OverrideChange {
    pub custom_price: Option<Decimal>,
    pub is_blocked: bool,
    pub minimum_nights_override: Option<i32>,
}

/// Partial edit of a Pending/Confirmed booking. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<i32>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub infants: Option<i32>,
    pub special_requests: Option<String>,
}

pub struct BookingService {
    homestays: Arc<dyn HomestayRepository>,
    calendar: Arc<dyn AvailabilityCalendarRepository>,
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationPort>,
    payments: Arc<dyn PaymentPort>,
    clock: Arc<dyn Clock>,
    fees: FeeRates,
}

impl BookingService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        homestays: Arc<dyn HomestayRepository>,
        calendar: Arc<dyn AvailabilityCalendarRepository>,
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationPort>,
        payments: Arc<dyn PaymentPort>,
        clock: Arc<dyn Clock>,
        fees: FeeRates,
    ) -> Self {
        Self {
            homestays,
            calendar,
            bookings,
            users,
            notifications,
            payments,
            clock,
            fees,
        }
    }

    async fn homestay(&self, id: i64) -> DomainResult<Homestay> {
        self.homestays
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Homestay", "id", id))
    }

    async fn user(&self, id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    async fn booking(&self, id: i64) -> DomainResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))
    }

    async fn context_for(&self, actor: ActorRef, booking: &Booking) -> DomainResult<TransitionContext> {
        match actor {
            ActorRef::System => Ok(TransitionContext::system()),
            ActorRef::User(user_id) => {
                let user = self.user(user_id).await?;
                let homestay = self.homestay(booking.homestay_id).await?;
                Ok(TransitionContext::user(
                    user.id,
                    user.role,
                    homestay.owner_id == user.id,
                    booking.guest_id == user.id,
                ))
            }
        }
    }

    /// Price quote for a stay, without touching any booking.
    pub async fn compute_price(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_count: i32,
    ) -> DomainResult<PriceBreakdown> {
        if check_out <= check_in {
            return Err(DomainError::Validation(
                "Check-out date must be after check-in date.".into(),
            ));
        }

        let homestay = self.homestay(homestay_id).await?;
        if !homestay.is_bookable() {
            return Err(DomainError::Validation(
                "This homestay is not available for booking.".into(),
            ));
        }

        let overrides = self
            .calendar
            .find_in_range(homestay_id, check_in, check_out)
            .await?;
        pricing::compute(
            &homestay,
            &overrides,
            check_in,
            check_out,
            guest_count,
            &self.fees,
        )
    }

    /// Non-binding availability answer. Re-evaluated atomically by the
    /// repository when a booking is actually created or confirmed.
    pub async fn check_availability(
        &self,
        homestay_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking: Option<i64>,
    ) -> DomainResult<bool> {
        if check_out <= check_in {
            return Err(DomainError::Validation(
                "Check-out date must be after check-in date.".into(),
            ));
        }

        let Some(homestay) = self.homestays.find_by_id(homestay_id).await? else {
            return Ok(false);
        };

        let existing = self
            .bookings
            .find_overlapping_active(homestay_id, check_in, check_out)
            .await?;
        let overrides = self
            .calendar
            .find_in_range(homestay_id, check_in, check_out)
            .await?;

        Ok(availability::is_range_available(
            &homestay,
            &existing,
            &overrides,
            check_in,
            check_out,
            exclude_booking,
        ))
    }

    /// Create or replace the calendar override for one date of a
    /// homestay. Writing to a soft-deleted date revives it in place.
    /// Only the owning host or an admin may manage the calendar.
    pub async fn set_calendar_override(
        &self,
        actor_id: i64,
        homestay_id: i64,
        date: NaiveDate,
        change: OverrideChange,
    ) -> DomainResult<CalendarOverride> {
        self.authorize_calendar(actor_id, homestay_id).await?;

        if let Some(price) = change.custom_price {
            if price < Decimal::ZERO {
                return Err(DomainError::Validation(
                    "Custom price cannot be negative.".into(),
                ));
            }
        }

        let now = self.clock.now();
        let saved = self
            .calendar
            .upsert(CalendarOverride {
                id: 0,
                homestay_id,
                date,
                custom_price: change.custom_price,
                is_blocked: change.is_blocked,
                minimum_nights_override: change.minimum_nights_override,
                is_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(
            "calendar override set for homestay {} on {}",
            homestay_id, date
        );
        Ok(saved)
    }

    /// Soft-delete the calendar override for one date. Removing a
    /// date with no override is a no-op.
    pub async fn remove_calendar_override(
        &self,
        actor_id: i64,
        homestay_id: i64,
        date: NaiveDate,
    ) -> DomainResult<()> {
        self.authorize_calendar(actor_id, homestay_id).await?;
        self.calendar.delete(homestay_id, date).await?;
        info!(
            "calendar override removed for homestay {} on {}",
            homestay_id, date
        );
        Ok(())
    }

    async fn authorize_calendar(&self, actor_id: i64, homestay_id: i64) -> DomainResult<()> {
        let user = self.user(actor_id).await?;
        let homestay = self.homestay(homestay_id).await?;

        let allowed = user.role == UserRole::Admin
            || (user.role == UserRole::Host && homestay.owner_id == user.id);
        if !allowed {
            return Err(DomainError::Forbidden(
                "not permitted to manage this homestay's calendar".into(),
            ));
        }
        Ok(())
    }

    /// Create a booking in `Pending` status.
    pub async fn create(&self, guest_id: i64, request: NewBooking) -> DomainResult<Booking> {
        info!(
            "creating booking for homestay {} by guest {}",
            request.homestay_id, guest_id
        );

        self.user(guest_id).await?;

        if request.check_out <= request.check_in {
            return Err(DomainError::Validation(
                "Check-out date must be after check-in date.".into(),
            ));
        }
        if request.check_in < self.clock.today() {
            return Err(DomainError::Validation(
                "Check-in date cannot be in the past.".into(),
            ));
        }
        if request.adults < 1 {
            return Err(DomainError::Validation(
                "At least one adult is required.".into(),
            ));
        }
        if request.guests != request.adults + request.children {
            return Err(DomainError::Validation(
                "Number of guests must equal adults plus children.".into(),
            ));
        }

        // An unknown homestay is NotFound, not an availability answer.
        self.homestay(request.homestay_id).await?;

        if !self
            .check_availability(request.homestay_id, request.check_in, request.check_out, None)
            .await?
        {
            return Err(DomainError::Conflict(
                "Homestay is not available for the selected dates.".into(),
            ));
        }

        let price = self
            .compute_price(
                request.homestay_id,
                request.check_in,
                request.check_out,
                request.guests,
            )
            .await?;

        let now = self.clock.now();
        let mut booking = Booking {
            id: 0,
            code: generate_booking_code(now),
            homestay_id: request.homestay_id,
            guest_id,
            check_in: request.check_in,
            check_out: request.check_out,
            counts: GuestCounts {
                guests: request.guests,
                adults: request.adults,
                children: request.children,
                infants: request.infants,
            },
            base_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            cleaning_fee: Decimal::ZERO,
            service_fee: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            status: BookingStatus::Pending,
            special_requests: request.special_requests,
            cancellation_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        };
        booking.apply_price(&price);

        let saved = self.bookings.insert_guarded(booking).await?;
        info!("booking {} created", saved.code);
        Ok(saved)
    }

    /// Edit fields of a Pending/Confirmed booking. Date changes re-run
    /// availability (excluding self) and pricing; on any failure the
    /// stored booking is left unchanged.
    pub async fn update(
        &self,
        booking_id: i64,
        actor_id: i64,
        changes: BookingUpdate,
    ) -> DomainResult<Booking> {
        let booking = self.booking(booking_id).await?;
        let homestay = self.homestay(booking.homestay_id).await?;
        let ctx = self.context_for(ActorRef::User(actor_id), &booking).await?;

        if !lifecycle::can_edit(&ctx) {
            return Err(DomainError::Forbidden(
                "not permitted to update this booking".into(),
            ));
        }
        if !booking.status.is_editable() {
            return Err(DomainError::Conflict(format!(
                "Booking cannot be updated in status {}.",
                booking.status
            )));
        }

        let mut updated = booking.clone();
        let new_check_in = changes.check_in.unwrap_or(booking.check_in);
        let new_check_out = changes.check_out.unwrap_or(booking.check_out);
        let dates_changed =
            new_check_in != booking.check_in || new_check_out != booking.check_out;

        if dates_changed {
            if new_check_out <= new_check_in {
                return Err(DomainError::Validation(
                    "Check-out date must be after check-in date.".into(),
                ));
            }
            if new_check_in < self.clock.today() {
                return Err(DomainError::Validation(
                    "Check-in date cannot be in the past.".into(),
                ));
            }
            if !self
                .check_availability(
                    booking.homestay_id,
                    new_check_in,
                    new_check_out,
                    Some(booking.id),
                )
                .await?
            {
                return Err(DomainError::Conflict(
                    "Homestay is not available for the new dates.".into(),
                ));
            }
            updated.check_in = new_check_in;
            updated.check_out = new_check_out;
        }

        let counts = GuestCounts {
            guests: changes.guests.unwrap_or(booking.counts.guests),
            adults: changes.adults.unwrap_or(booking.counts.adults),
            children: changes.children.unwrap_or(booking.counts.children),
            infants: changes.infants.unwrap_or(booking.counts.infants),
        };
        if counts.adults < 1 {
            return Err(DomainError::Validation(
                "At least one adult is required.".into(),
            ));
        }
        if counts.guests != counts.adults + counts.children {
            return Err(DomainError::Validation(
                "Number of guests must equal adults plus children.".into(),
            ));
        }
        if counts.guests > homestay.maximum_guests {
            return Err(DomainError::Validation(format!(
                "Maximum number of guests is {}.",
                homestay.maximum_guests
            )));
        }
        updated.counts = counts;

        if let Some(requests) = changes.special_requests {
            updated.special_requests = Some(requests);
        }

        if dates_changed {
            let price = self
                .compute_price(
                    updated.homestay_id,
                    updated.check_in,
                    updated.check_out,
                    updated.counts.guests,
                )
                .await?;
            updated.apply_price(&price);
        }

        updated.updated_at = self.clock.now();
        let saved = if dates_changed {
            self.bookings.update_guarded(updated, booking.status).await?
        } else {
            self.bookings.update(updated, booking.status).await?
        };
        info!("booking {} updated", saved.code);
        Ok(saved)
    }

    /// Run a lifecycle transition on behalf of `actor`.
    ///
    /// Confirmation re-validates availability (excluding the booking
    /// itself) inside the repository guard and fails with `Conflict`
    /// if another reservation now overlaps.
    pub async fn transition(
        &self,
        booking_id: i64,
        actor: ActorRef,
        target: BookingStatus,
        reason: Option<&str>,
    ) -> DomainResult<Booking> {
        let booking = self.booking(booking_id).await?;
        let ctx = self.context_for(actor, &booking).await?;

        let updated = lifecycle::transition(&booking, &ctx, target, reason, self.clock.now())?;

        // The write only lands if the status is still the one the
        // state machine validated; a concurrent transition loses as
        // Conflict instead of silently overwriting it.
        let saved = if target == BookingStatus::Confirmed {
            self.bookings.update_guarded(updated, booking.status).await?
        } else {
            self.bookings.update(updated, booking.status).await?
        };

        info!(
            "booking {} moved {} -> {}",
            saved.code, booking.status, saved.status
        );
        self.dispatch_side_effects(&saved).await;
        Ok(saved)
    }

    /// Load a booking, enforcing the view permission (owning guest,
    /// owning host, or admin).
    pub async fn get(&self, booking_id: i64, actor_id: i64) -> DomainResult<Booking> {
        let booking = self.booking(booking_id).await?;
        self.authorize_view(&booking, actor_id).await?;
        Ok(booking)
    }

    pub async fn get_by_code(&self, code: &str, actor_id: i64) -> DomainResult<Booking> {
        let booking = self
            .bookings
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "code", code))?;
        self.authorize_view(&booking, actor_id).await?;
        Ok(booking)
    }

    async fn authorize_view(&self, booking: &Booking, actor_id: i64) -> DomainResult<()> {
        let user = self.user(actor_id).await?;
        let homestay = self.homestay(booking.homestay_id).await?;

        let allowed = user.role == UserRole::Admin
            || (user.role == UserRole::Host && homestay.owner_id == user.id)
            || booking.guest_id == user.id;
        if !allowed {
            return Err(DomainError::Forbidden(
                "not permitted to view this booking".into(),
            ));
        }
        Ok(())
    }

    /// Best-effort outbound notifications; failures must never undo a
    /// committed transition, so the ports cannot fail.
    async fn dispatch_side_effects(&self, booking: &Booking) {
        match booking.status {
            BookingStatus::Confirmed => self.notifications.booking_confirmed(booking).await,
            BookingStatus::Rejected => {
                self.notifications.booking_rejected(booking).await;
                self.payments.initiate_refund(booking).await;
            }
            BookingStatus::Cancelled => {
                self.notifications.booking_cancelled(booking).await;
                self.payments.initiate_refund(booking).await;
            }
            BookingStatus::CheckedIn => self.notifications.booking_checked_in(booking).await,
            _ => {}
        }
    }
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("fees", &self.fees)
            .finish_non_exhaustive()
    }
}

// ── Tests ──────────────────────────────────────────────────────
