//! Booking state machine
//!
//! One authorization predicate and one state-validity table govern
//! every transition, so a new transition cannot forget a check. Role
//! permission is evaluated before state validity: an actor who may
//! never perform a transition gets `Forbidden`, an allowed actor in
//! the wrong state gets `InvalidTransition`.

use chrono::{DateTime, NaiveDate, Utc};

use super::model::{Booking, BookingStatus};
use crate::domain::user::UserRole;
use crate::domain::{DomainError, DomainResult};

/// Cancellation reason recorded by the expiration sweep.
pub const EXPIRATION_REASON: &str = "Booking expired due to pending payment timeout.";
/// `cancelled_by` marker for system transitions.
pub const SYSTEM_ACTOR: &str = "System";

/// Who is requesting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// Background jobs (expiration sweep, completion bookkeeping)
    System,
    User { id: i64, role: UserRole },
}

/// Actor plus the ownership facts the permission rules need.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext {
    pub actor: Actor,
    /// Actor owns the homestay the booking is for
    pub owns_homestay: bool,
    /// Actor is the guest who made the booking
    pub owns_booking: bool,
}

impl TransitionContext {
    pub fn system() -> Self {
        Self {
            actor: Actor::System,
            owns_homestay: false,
            owns_booking: false,
        }
    }

    pub fn user(id: i64, role: UserRole, owns_homestay: bool, owns_booking: bool) -> Self {
        Self {
            actor: Actor::User { id, role },
            owns_homestay,
            owns_booking,
        }
    }

    fn is_admin(&self) -> bool {
        matches!(
            self.actor,
            Actor::User {
                role: UserRole::Admin,
                ..
            }
        )
    }

    fn is_owning_host(&self) -> bool {
        self.owns_homestay
            && matches!(
                self.actor,
                Actor::User {
                    role: UserRole::Host | UserRole::Admin,
                    ..
                }
            )
    }

    fn is_owning_guest(&self) -> bool {
        self.owns_booking && matches!(self.actor, Actor::User { .. })
    }

    fn is_system(&self) -> bool {
        matches!(self.actor, Actor::System)
    }

    /// Value stored in `cancelled_by` when this actor cancels/rejects.
    fn cancelled_by_marker(&self) -> String {
        match self.actor {
            Actor::System => SYSTEM_ACTOR.to_string(),
            Actor::User { id, .. } => id.to_string(),
        }
    }
}

/// May this actor request the given target status at all?
///
/// Admins act on any booking; hosts only on bookings for homestays
/// they own; guests only on their own booking; system transitions are
/// restricted to the expiration cancel and completion bookkeeping.
pub fn authorize(ctx: &TransitionContext, target: BookingStatus) -> DomainResult<()> {
    let allowed = match target {
        BookingStatus::Confirmed | BookingStatus::Rejected => {
            ctx.is_admin() || ctx.is_owning_host()
        }
        BookingStatus::Cancelled => ctx.is_admin() || ctx.is_owning_guest() || ctx.is_system(),
        BookingStatus::CheckedIn | BookingStatus::CheckedOut | BookingStatus::NoShow => {
            ctx.is_admin() || ctx.is_owning_host()
        }
        BookingStatus::Completed => ctx.is_admin() || ctx.is_system(),
        // Pending is the creation status, never a transition target.
        BookingStatus::Pending => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "not permitted to move this booking to {}",
            target
        )))
    }
}

/// Is `from -> target` a legal edge of the state machine?
pub fn validate_state(
    ctx: &TransitionContext,
    from: BookingStatus,
    target: BookingStatus,
) -> DomainResult<()> {
    use BookingStatus::*;

    let legal = match (from, target) {
        (Pending, Confirmed) => true,
        (Pending, Rejected) => true,
        (Pending, Cancelled) => true,
        // The system may only reclaim pending bookings.
        (Confirmed, Cancelled) => !ctx.is_system(),
        (Confirmed, CheckedIn) => true,
        (Confirmed, NoShow) => true,
        (CheckedIn, CheckedOut) => true,
        (CheckedOut, Completed) => true,
        _ => false,
    };

    if legal {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition { from, to: target })
    }
}

/// Time gates: check-in no earlier than the check-in date, no-show
/// only strictly after it.
pub fn validate_timing(
    target: BookingStatus,
    check_in: NaiveDate,
    today: NaiveDate,
) -> DomainResult<()> {
    match target {
        BookingStatus::CheckedIn if today < check_in => Err(DomainError::Validation(
            "Cannot check in before the check-in date.".into(),
        )),
        BookingStatus::NoShow if today <= check_in => Err(DomainError::Validation(
            "Cannot mark as no-show before the check-in date has passed.".into(),
        )),
        _ => Ok(()),
    }
}

/// Run the full transition: permission, state validity, time gates,
/// reason requirements, then produce the updated booking.
pub fn transition(
    booking: &Booking,
    ctx: &TransitionContext,
    target: BookingStatus,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> DomainResult<Booking> {
    authorize(ctx, target)?;
    validate_state(ctx, booking.status, target)?;
    validate_timing(target, booking.check_in, now.date_naive())?;

    let mut updated = booking.clone();
    updated.status = target;
    updated.updated_at = now;

    match target {
        BookingStatus::Cancelled if ctx.is_system() => {
            updated.cancellation_reason = Some(EXPIRATION_REASON.to_string());
            updated.cancelled_by = Some(SYSTEM_ACTOR.to_string());
            updated.cancelled_at = Some(now);
        }
        BookingStatus::Cancelled | BookingStatus::Rejected => {
            let verb = if target == BookingStatus::Rejected {
                "reject"
            } else {
                "cancel"
            };
            let reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    DomainError::Validation(format!("A reason is required to {} a booking.", verb))
                })?;
            updated.cancellation_reason = Some(reason.to_string());
            updated.cancelled_by = Some(ctx.cancelled_by_marker());
            updated.cancelled_at = Some(now);
        }
        _ => {}
    }

    Ok(updated)
}

/// Whether this actor may edit booking fields (dates, guest counts,
/// special requests). Status gating is separate; see
/// [`BookingStatus::is_editable`].
pub fn can_edit(ctx: &TransitionContext) -> bool {
    ctx.is_admin() || ctx.is_owning_host() || ctx.is_owning_guest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::GuestCounts;
    use rust_decimal::Decimal;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            code: "BK-20250107-A1B2C".to_string(),
            homestay_id: 1,
            guest_id: 20,
            check_in: "2025-06-10".parse().unwrap(),
            check_out: "2025-06-15".parse().unwrap(),
            counts: GuestCounts {
                guests: 2,
                adults: 2,
                children: 0,
                infants: 0,
            },
            base_amount: Decimal::from(500),
            discount_amount: Decimal::ZERO,
            cleaning_fee: Decimal::from(25),
            service_fee: Decimal::from(50),
            tax_amount: Decimal::from(46),
            total_amount: Decimal::from(621),
            status,
            special_requests: None,
            cancellation_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            created_at: "2025-06-01T10:00:00Z".parse().unwrap(),
            updated_at: "2025-06-01T10:00:00Z".parse().unwrap(),
        }
    }

    fn admin() -> TransitionContext {
        TransitionContext::user(1, UserRole::Admin, false, false)
    }

    fn owning_host() -> TransitionContext {
        TransitionContext::user(10, UserRole::Host, true, false)
    }

    fn other_host() -> TransitionContext {
        TransitionContext::user(11, UserRole::Host, false, false)
    }

    fn owning_guest() -> TransitionContext {
        TransitionContext::user(20, UserRole::Guest, false, true)
    }

    fn other_guest() -> TransitionContext {
        TransitionContext::user(21, UserRole::Guest, false, false)
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn host_confirms_pending_booking() {
        let updated = transition(
            &booking(BookingStatus::Pending),
            &owning_host(),
            BookingStatus::Confirmed,
            None,
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert!(updated.cancellation_reason.is_none());
    }

    #[test]
    fn foreign_host_cannot_confirm() {
        let err = transition(
            &booking(BookingStatus::Pending),
            &other_host(),
            BookingStatus::Confirmed,
            None,
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn guest_cannot_confirm_own_booking() {
        let err = transition(
            &booking(BookingStatus::Pending),
            &owning_guest(),
            BookingStatus::Confirmed,
            None,
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn forbidden_is_checked_before_state_validity() {
        // Foreign guest asking to confirm a cancelled booking: the
        // role failure wins over the terminal-state failure.
        let err = transition(
            &booking(BookingStatus::Cancelled),
            &other_guest(),
            BookingStatus::Confirmed,
            None,
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn every_terminal_state_rejects_further_transitions() {
        for from in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
            BookingStatus::NoShow,
        ] {
            for target in [
                BookingStatus::Confirmed,
                BookingStatus::Cancelled,
                BookingStatus::CheckedIn,
                BookingStatus::CheckedOut,
                BookingStatus::Completed,
            ] {
                let err = transition(
                    &booking(from),
                    &admin(),
                    target,
                    Some("reason"),
                    at("2025-06-20T10:00:00Z"),
                )
                .unwrap_err();
                assert!(
                    matches!(err, DomainError::InvalidTransition { .. }),
                    "{} -> {} should be InvalidTransition",
                    from,
                    target
                );
            }
        }
    }

    #[test]
    fn guest_cancels_own_pending_with_reason() {
        let updated = transition(
            &booking(BookingStatus::Pending),
            &owning_guest(),
            BookingStatus::Cancelled,
            Some("Change of plans"),
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);
        assert_eq!(updated.cancellation_reason.as_deref(), Some("Change of plans"));
        assert_eq!(updated.cancelled_by.as_deref(), Some("20"));
        assert!(updated.cancelled_at.is_some());
    }

    #[test]
    fn cancel_without_reason_is_rejected() {
        let err = transition(
            &booking(BookingStatus::Pending),
            &owning_guest(),
            BookingStatus::Cancelled,
            Some("   "),
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn guest_cannot_cancel_after_check_in() {
        let err = transition(
            &booking(BookingStatus::CheckedIn),
            &owning_guest(),
            BookingStatus::Cancelled,
            Some("too late"),
            at("2025-06-11T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn host_rejects_pending_with_required_reason() {
        let err = transition(
            &booking(BookingStatus::Pending),
            &owning_host(),
            BookingStatus::Rejected,
            None,
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let updated = transition(
            &booking(BookingStatus::Pending),
            &owning_host(),
            BookingStatus::Rejected,
            Some("Dates unavailable"),
            at("2025-06-02T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Rejected);
        assert_eq!(updated.cancelled_by.as_deref(), Some("10"));
    }

    #[test]
    fn check_in_gated_on_check_in_date() {
        let early = transition(
            &booking(BookingStatus::Confirmed),
            &owning_host(),
            BookingStatus::CheckedIn,
            None,
            at("2025-06-09T23:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(early, DomainError::Validation(_)));

        let on_day = transition(
            &booking(BookingStatus::Confirmed),
            &owning_host(),
            BookingStatus::CheckedIn,
            None,
            at("2025-06-10T08:00:00Z"),
        )
        .unwrap();
        assert_eq!(on_day.status, BookingStatus::CheckedIn);
    }

    #[test]
    fn no_show_requires_check_in_date_passed() {
        let on_day = transition(
            &booking(BookingStatus::Confirmed),
            &owning_host(),
            BookingStatus::NoShow,
            None,
            at("2025-06-10T23:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(on_day, DomainError::Validation(_)));

        let after = transition(
            &booking(BookingStatus::Confirmed),
            &owning_host(),
            BookingStatus::NoShow,
            None,
            at("2025-06-11T01:00:00Z"),
        )
        .unwrap();
        assert_eq!(after.status, BookingStatus::NoShow);
    }

    #[test]
    fn checked_out_completes_by_system_or_admin() {
        let by_system = transition(
            &booking(BookingStatus::CheckedOut),
            &TransitionContext::system(),
            BookingStatus::Completed,
            None,
            at("2025-06-16T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(by_system.status, BookingStatus::Completed);

        let by_host = transition(
            &booking(BookingStatus::CheckedOut),
            &owning_host(),
            BookingStatus::Completed,
            None,
            at("2025-06-16T10:00:00Z"),
        )
        .unwrap_err();
        assert!(matches!(by_host, DomainError::Forbidden(_)));
    }

    #[test]
    fn system_cancel_marks_expiration_metadata() {
        let updated = transition(
            &booking(BookingStatus::Pending),
            &TransitionContext::system(),
            BookingStatus::Cancelled,
            None,
            at("2025-06-02T10:31:00Z"),
        )
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);
        assert_eq!(updated.cancellation_reason.as_deref(), Some(EXPIRATION_REASON));
        assert_eq!(updated.cancelled_by.as_deref(), Some(SYSTEM_ACTOR));
    }

    #[test]
    fn system_cannot_cancel_confirmed_booking() {
        let err = transition(
            &booking(BookingStatus::Confirmed),
            &TransitionContext::system(),
            BookingStatus::Cancelled,
            None,
            at("2025-06-02T10:31:00Z"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn edit_permission_matrix() {
        assert!(can_edit(&admin()));
        assert!(can_edit(&owning_host()));
        assert!(can_edit(&owning_guest()));
        assert!(!can_edit(&other_host()));
        assert!(!can_edit(&other_guest()));
        assert!(!can_edit(&TransitionContext::system()));
    }
}
