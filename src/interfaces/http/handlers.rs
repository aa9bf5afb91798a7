//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::booking::{
    ActorRef, BookingService, BookingUpdate, NewBooking, OverrideChange,
};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
}

fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Conflict(_) | DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject<T>(e: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    if let DomainError::Internal(ref detail) = e {
        tracing::error!("internal error: {}", detail);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Internal server error")),
        );
    }
    (status_for(&e), Json(ApiResponse::error(e.to_string())))
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// POST /api/v1/pricing/quote
pub async fn quote(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> HandlerResult<PriceBreakdownDto> {
    let breakdown = state
        .service
        .compute_price(
            request.homestay_id,
            request.check_in,
            request.check_out,
            request.guests,
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(breakdown.into())))
}

/// GET /api/v1/availability
pub async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<AvailabilityDto> {
    let available = state
        .service
        .check_availability(query.homestay_id, query.check_in, query.check_out, None)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(AvailabilityDto {
        homestay_id: query.homestay_id,
        check_in: query.check_in,
        check_out: query.check_out,
        available,
    })))
}

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> HandlerResult<BookingDto> {
    let booking = state
        .service
        .create(
            request.actor_id,
            NewBooking {
                homestay_id: request.homestay_id,
                check_in: request.check_in,
                check_out: request.check_out,
                guests: request.guests,
                adults: request.adults,
                children: request.children,
                infants: request.infants,
                special_requests: request.special_requests,
            },
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Query(actor): Query<ActorQuery>,
) -> HandlerResult<BookingDto> {
    let booking = state
        .service
        .get(booking_id, actor.actor_id)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

/// GET /api/v1/bookings/code/{code}
pub async fn get_booking_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> HandlerResult<BookingDto> {
    let booking = state
        .service
        .get_by_code(&code, actor.actor_id)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

/// PATCH /api/v1/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> HandlerResult<BookingDto> {
    let booking = state
        .service
        .update(
            booking_id,
            request.actor_id,
            BookingUpdate {
                check_in: request.check_in,
                check_out: request.check_out,
                guests: request.guests,
                adults: request.adults,
                children: request.children,
                infants: request.infants,
                special_requests: request.special_requests,
            },
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(booking.into())))
}

/// PUT /api/v1/homestays/{id}/calendar/{date}
pub async fn set_calendar_override(
    State(state): State<AppState>,
    Path((homestay_id, date)): Path<(i64, chrono::NaiveDate)>,
    ValidatedJson(request): ValidatedJson<CalendarOverrideRequest>,
) -> HandlerResult<CalendarOverrideDto> {
    let saved = state
        .service
        .set_calendar_override(
            request.actor_id,
            homestay_id,
            date,
            OverrideChange {
                custom_price: request.custom_price,
                is_blocked: request.is_blocked,
                minimum_nights_override: request.minimum_nights_override,
            },
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(saved.into())))
}

/// DELETE /api/v1/homestays/{id}/calendar/{date}
pub async fn remove_calendar_override(
    State(state): State<AppState>,
    Path((homestay_id, date)): Path<(i64, chrono::NaiveDate)>,
    Query(actor): Query<ActorQuery>,
) -> HandlerResult<()> {
    state
        .service
        .remove_calendar_override(actor.actor_id, homestay_id, date)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(())))
}

/// POST /api/v1/bookings/{id}/transition
pub async fn transition_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<TransitionRequest>,
) -> HandlerResult<BookingDto> {
    let Some(target) = request.parse_target() else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown booking status '{}'",
                request.target
            ))),
        ));
    };

    let booking = state
        .service
        .transition(
            booking_id,
            ActorRef::User(request.actor_id),
            target,
            request.reason.as_deref(),
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(booking.into())))
}
